//! Field definition domain model.
//!
//! A field definition describes one dynamic attribute of an artist category:
//! its machine name, label, type and constraints. Option lists and validation
//! rules arrive from storage as JSON and are parsed once, when the definition
//! is loaded, into the typed [`FieldOptions`] and [`ValidationRules`].

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::FieldSchemaError;
use crate::models::field_type::FieldType;

/// Ordered set of allowed values for SELECT and MULTI_SELECT fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions(Vec<String>);

impl FieldOptions {
    /// Builds an option set, rejecting blank, duplicated or comma-bearing entries.
    pub fn new(options: Vec<String>) -> Result<Self, String> {
        shared::validation::validate_options(&options).map_err(|e| {
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })?;
        Ok(Self(options))
    }

    /// Parses the JSON array stored in the `options` column.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let options: Vec<String> = serde_json::from_value(value.clone())
            .map_err(|e| format!("options must be an array of strings: {}", e))?;
        Self::new(options)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|o| o == value)
    }

    /// Declared position of an option, used to order multi-select values.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.0.iter().position(|o| o == value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.0)
    }
}

/// Validation rules as they are written and stored (JSON object).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationRulesSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression the whole value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ValidationRulesSpec {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.min.is_none()
            && self.max.is_none()
    }
}

/// Compiled validation rules, checked against a field's type.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    spec: ValidationRulesSpec,
    pattern: Option<Regex>,
}

impl ValidationRules {
    /// Type-checks a rule spec and compiles its pattern.
    pub fn compile(spec: ValidationRulesSpec, field_type: FieldType) -> Result<Self, String> {
        let has_text_rules =
            spec.min_length.is_some() || spec.max_length.is_some() || spec.pattern.is_some();
        let has_numeric_rules = spec.min.is_some() || spec.max.is_some();

        if has_text_rules && !field_type.supports_text_rules() {
            return Err(format!(
                "length and pattern rules do not apply to {} fields",
                field_type
            ));
        }
        if has_numeric_rules && !field_type.supports_numeric_rules() {
            return Err(format!(
                "min and max rules do not apply to {} fields",
                field_type
            ));
        }
        if let (Some(min), Some(max)) = (spec.min_length, spec.max_length) {
            if min > max {
                return Err("minLength cannot exceed maxLength".to_string());
            }
        }
        if let (Some(min), Some(max)) = (spec.min, spec.max) {
            if min > max {
                return Err("min cannot exceed max".to_string());
            }
        }
        if spec.min.is_some_and(|v| !v.is_finite()) || spec.max.is_some_and(|v| !v.is_finite()) {
            return Err("min and max must be finite numbers".to_string());
        }

        let pattern = match &spec.pattern {
            Some(p) => Some(
                Regex::new(&format!("^(?:{})$", p))
                    .map_err(|e| format!("pattern does not compile: {}", e))?,
            ),
            None => None,
        };

        Ok(Self { spec, pattern })
    }

    /// Parses and compiles the JSON object stored in the `validation_rules` column.
    pub fn from_json(value: &serde_json::Value, field_type: FieldType) -> Result<Self, String> {
        let spec: ValidationRulesSpec = serde_json::from_value(value.clone())
            .map_err(|e| format!("validation rules are malformed: {}", e))?;
        Self::compile(spec, field_type)
    }

    pub fn spec(&self) -> &ValidationRulesSpec {
        &self.spec
    }

    pub fn min_length(&self) -> Option<usize> {
        self.spec.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.spec.max_length
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.spec).unwrap_or(serde_json::Value::Null)
    }
}

/// Typed constraints of a definition: its option set and its rules.
pub type FieldConstraints = (Option<FieldOptions>, Option<ValidationRules>);

fn check_option_presence(field_type: FieldType, present: bool) -> Result<(), String> {
    match (field_type.has_options(), present) {
        (true, false) => Err(format!("{} fields require a non-empty option list", field_type)),
        (false, true) => Err(format!("{} fields do not take an option list", field_type)),
        _ => Ok(()),
    }
}

/// Builds typed constraints from raw options and rules, checking them against the type.
pub fn build_constraints(
    field_type: FieldType,
    options: Option<Vec<String>>,
    rules: Option<ValidationRulesSpec>,
) -> Result<FieldConstraints, String> {
    check_option_presence(field_type, options.is_some())?;
    let options = options.map(FieldOptions::new).transpose()?;

    let rules = match rules {
        Some(spec) if !spec.is_empty() => Some(ValidationRules::compile(spec, field_type)?),
        _ => None,
    };

    Ok((options, rules))
}

/// Parses the stored JSON columns of a definition into typed constraints.
/// JSON `null` counts as absent.
pub fn parse_stored_constraints(
    field_definition_id: Uuid,
    field_type: FieldType,
    options: Option<&serde_json::Value>,
    rules: Option<&serde_json::Value>,
) -> Result<FieldConstraints, FieldSchemaError> {
    let malformed = |reason: String| FieldSchemaError::MalformedSchema {
        field_definition_id,
        reason,
    };
    fn present(value: Option<&serde_json::Value>) -> Option<&serde_json::Value> {
        value.filter(|v| !v.is_null())
    }

    let options = present(options)
        .map(FieldOptions::from_json)
        .transpose()
        .map_err(malformed)?;
    check_option_presence(field_type, options.is_some()).map_err(malformed)?;

    let rules = present(rules)
        .map(|value| ValidationRules::from_json(value, field_type))
        .transpose()
        .map_err(malformed)?
        .filter(|r| !r.spec().is_empty());

    Ok((options, rules))
}

/// A schema entry describing one dynamic attribute of an artist category.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub id: Uuid,
    pub artist_category_id: Uuid,
    pub field_name: String,
    pub display_name: String,
    pub field_type: FieldType,
    pub is_required: bool,
    pub is_searchable: bool,
    pub sort_order: i32,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub options: Option<FieldOptions>,
    pub validation_rules: Option<ValidationRules>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for defining a new field on a category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DefineFieldRequest {
    #[validate(custom(function = "shared::validation::validate_field_name"))]
    pub field_name: String,

    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,

    pub field_type: FieldType,

    #[serde(default)]
    pub is_required: bool,

    #[serde(default)]
    pub is_searchable: bool,

    #[serde(default)]
    pub sort_order: i32,

    #[validate(length(max = 255, message = "Placeholder must be at most 255 characters"))]
    pub placeholder: Option<String>,

    #[validate(length(max = 500, message = "Help text must be at most 500 characters"))]
    pub help_text: Option<String>,

    #[validate(custom(function = "shared::validation::validate_options"))]
    pub options: Option<Vec<String>>,

    pub validation_rules: Option<ValidationRulesSpec>,
}

impl DefineFieldRequest {
    /// Checks the cross-field constraints the derive cannot express and
    /// returns the typed option set and rules.
    pub fn constraints(&self) -> Result<FieldConstraints, FieldSchemaError> {
        build_constraints(
            self.field_type,
            self.options.clone(),
            self.validation_rules.clone(),
        )
        .map_err(FieldSchemaError::InvalidDefinition)
    }
}

/// Field definition as exposed to form generators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinitionResponse {
    pub id: Uuid,
    pub artist_category_id: Uuid,
    pub field_name: String,
    pub display_name: String,
    pub field_type: FieldType,
    pub is_required: bool,
    pub is_searchable: bool,
    pub sort_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<ValidationRulesSpec>,
}

impl From<&FieldDefinition> for FieldDefinitionResponse {
    fn from(def: &FieldDefinition) -> Self {
        Self {
            id: def.id,
            artist_category_id: def.artist_category_id,
            field_name: def.field_name.clone(),
            display_name: def.display_name.clone(),
            field_type: def.field_type,
            is_required: def.is_required,
            is_searchable: def.is_searchable,
            sort_order: def.sort_order,
            placeholder: def.placeholder.clone(),
            help_text: def.help_text.clone(),
            options: def.options.as_ref().map(FieldOptions::to_vec),
            validation_rules: def.validation_rules.as_ref().map(|r| r.spec().clone()),
        }
    }
}

/// Response for the field listing endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFieldsResponse {
    pub artist_category_id: Uuid,
    pub fields: Vec<FieldDefinitionResponse>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_field_options_order_and_lookup() {
        let opts = FieldOptions::new(options(&["SLIM", "ATHLETIC", "AVERAGE"])).unwrap();
        assert!(opts.contains("ATHLETIC"));
        assert!(!opts.contains("athletic"));
        assert_eq!(opts.position("AVERAGE"), Some(2));
        assert_eq!(opts.to_json(), json!(["SLIM", "ATHLETIC", "AVERAGE"]));
    }

    #[test]
    fn test_field_options_from_json_rejects_non_strings() {
        assert!(FieldOptions::from_json(&json!(["A", 1])).is_err());
        assert!(FieldOptions::from_json(&json!({"a": "b"})).is_err());
        assert!(FieldOptions::from_json(&json!([])).is_err());
    }

    #[test]
    fn test_validation_rules_type_checking() {
        let length = ValidationRulesSpec {
            max_length: Some(10),
            ..Default::default()
        };
        assert!(ValidationRules::compile(length.clone(), FieldType::Text).is_ok());
        assert!(ValidationRules::compile(length, FieldType::Boolean).is_err());

        let bounds = ValidationRulesSpec {
            min: Some(0.0),
            max: Some(300.0),
            ..Default::default()
        };
        assert!(ValidationRules::compile(bounds.clone(), FieldType::Number).is_ok());
        assert!(ValidationRules::compile(bounds, FieldType::Text).is_err());
    }

    #[test]
    fn test_validation_rules_reject_inverted_bounds() {
        let spec = ValidationRulesSpec {
            min_length: Some(5),
            max_length: Some(2),
            ..Default::default()
        };
        let err = ValidationRules::compile(spec, FieldType::Text).unwrap_err();
        assert!(err.contains("minLength"));
    }

    #[test]
    fn test_validation_rules_pattern_matches_whole_value() {
        let spec = ValidationRulesSpec {
            pattern: Some(r"\d{2,3}cm".to_string()),
            ..Default::default()
        };
        let rules = ValidationRules::compile(spec, FieldType::Text).unwrap();
        let pattern = rules.pattern().unwrap();
        assert!(pattern.is_match("180cm"));
        assert!(!pattern.is_match("about 180cm tall"));
    }

    #[test]
    fn test_validation_rules_bad_pattern() {
        let spec = ValidationRulesSpec {
            pattern: Some("(unclosed".to_string()),
            ..Default::default()
        };
        assert!(ValidationRules::compile(spec, FieldType::Text).is_err());
    }

    #[test]
    fn test_validation_rules_from_json_rejects_unknown_keys() {
        let err = ValidationRules::from_json(&json!({"maxLen": 3}), FieldType::Text).unwrap_err();
        assert!(err.contains("malformed"));
    }

    #[test]
    fn test_build_constraints_requires_options_for_select() {
        assert!(build_constraints(FieldType::Select, None, None).is_err());
        assert!(build_constraints(FieldType::Text, Some(options(&["A"])), None).is_err());

        let (opts, rules) =
            build_constraints(FieldType::MultiSelect, Some(options(&["EN", "HI"])), None).unwrap();
        assert_eq!(opts.unwrap().as_slice().len(), 2);
        assert!(rules.is_none());
    }

    #[test]
    fn test_build_constraints_drops_empty_rules() {
        let (_, rules) =
            build_constraints(FieldType::Text, None, Some(ValidationRulesSpec::default())).unwrap();
        assert!(rules.is_none());
    }

    #[test]
    fn test_parse_stored_constraints_reports_definition_id() {
        let id = Uuid::new_v4();
        let err = parse_stored_constraints(id, FieldType::Select, Some(&json!("SLIM")), None)
            .unwrap_err();
        match err {
            FieldSchemaError::MalformedSchema {
                field_definition_id,
                ..
            } => assert_eq!(field_definition_id, id),
            other => panic!("Expected MalformedSchema, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_stored_constraints_checks_option_presence() {
        let id = Uuid::new_v4();
        assert!(parse_stored_constraints(id, FieldType::Select, None, None).is_err());
        assert!(
            parse_stored_constraints(id, FieldType::Boolean, Some(&json!(["YES"])), None).is_err()
        );
        assert!(parse_stored_constraints(id, FieldType::Select, Some(&json!([])), None).is_err());
    }

    #[test]
    fn test_parse_stored_constraints_compiles_rules_and_drops_empty() {
        let id = Uuid::new_v4();
        let (_, rules) =
            parse_stored_constraints(id, FieldType::Number, None, Some(&json!({"min": 50, "max": 250})))
                .unwrap();
        assert_eq!(rules.unwrap().spec().max, Some(250.0));

        let (_, rules) = parse_stored_constraints(id, FieldType::Text, None, Some(&json!({}))).unwrap();
        assert!(rules.is_none());

        let err = parse_stored_constraints(id, FieldType::Text, None, Some(&json!({"maxLen": 3})))
            .unwrap_err();
        assert!(err.to_string().contains("validation rules are malformed"));
    }

    #[test]
    fn test_parse_stored_constraints_treats_json_null_as_absent() {
        let (opts, rules) = parse_stored_constraints(
            Uuid::new_v4(),
            FieldType::Text,
            Some(&serde_json::Value::Null),
            Some(&serde_json::Value::Null),
        )
        .unwrap();
        assert!(opts.is_none());
        assert!(rules.is_none());
    }

    #[test]
    fn test_define_field_request_deserialize_and_validate() {
        let json = r#"{
            "fieldName": "body_type",
            "displayName": "Body Type",
            "fieldType": "SELECT",
            "isSearchable": true,
            "sortOrder": 3,
            "options": ["SLIM", "ATHLETIC", "AVERAGE"]
        }"#;
        let req: DefineFieldRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
        assert!(!req.is_required);
        assert!(req.constraints().is_ok());
    }

    #[test]
    fn test_define_field_request_rejects_bad_name_and_options() {
        let json = r#"{
            "fieldName": "Body Type",
            "displayName": "Body Type",
            "fieldType": "SELECT",
            "options": ["SLIM", "SLIM"]
        }"#;
        let req: DefineFieldRequest = serde_json::from_str(json).unwrap();
        let errors = req.validate().unwrap_err();
        let field_errors = errors.field_errors();
        assert!(field_errors.contains_key("field_name"));
        assert!(field_errors.contains_key("options"));
    }

    #[test]
    fn test_define_field_request_select_without_options() {
        let json = r#"{"fieldName":"vocal_range","displayName":"Vocal Range","fieldType":"SELECT"}"#;
        let req: DefineFieldRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());
        assert!(matches!(
            req.constraints(),
            Err(FieldSchemaError::InvalidDefinition(_))
        ));
    }
}
