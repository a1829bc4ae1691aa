//! Type-driven validation of a single submitted field value.
//!
//! Each [`FieldType`] has its own acceptance rules. A value that passes is
//! converted into a typed [`FieldValue`]; a blank value yields `None` and is
//! treated by the reconciler as "not submitted".

use chrono::NaiveDate;

use crate::error::FieldViolation;
use crate::models::field_definition::{FieldDefinition, ValidationRules};
use crate::models::field_type::FieldType;
use crate::models::field_value::{
    FieldValue, FileAttachment, FileAttachmentInput, SubmittedValue, DATE_FORMAT,
    MULTI_VALUE_DELIMITER,
};

/// Size ceilings applied to every submission regardless of field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionLimits {
    /// Maximum characters of any text-like value.
    pub max_text_length: usize,
    /// Maximum declared size of an attached file.
    pub max_file_size_bytes: i64,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            max_text_length: 10_000,
            max_file_size_bytes: 100 * 1024 * 1024,
        }
    }
}

/// Validates one submitted value against its field definition.
///
/// Returns `Ok(None)` for blank input (absent, whitespace-only string, empty
/// list, or a file descriptor with no content).
pub fn validate_submitted_value(
    def: &FieldDefinition,
    value: Option<&SubmittedValue>,
    limits: &SubmissionLimits,
) -> Result<Option<FieldValue>, FieldViolation> {
    let Some(value) = value else {
        return Ok(None);
    };
    if is_blank(value) {
        return Ok(None);
    }

    let validated = match def.field_type {
        FieldType::Text | FieldType::Textarea => {
            let text = expect_text(def, value)?;
            check_text_rules(def, &text, limits)?;
            FieldValue::Text(text)
        }
        FieldType::Select => {
            let choice = expect_text(def, value)?;
            check_option(def, &choice)?;
            FieldValue::Text(choice)
        }
        FieldType::MultiSelect => match validate_multi_select(def, value)? {
            Some(selected) => FieldValue::MultiSelect(selected),
            None => return Ok(None),
        },
        FieldType::Boolean => FieldValue::Boolean(parse_boolean(def, value)?),
        FieldType::Url => {
            let raw = expect_text(def, value)?;
            check_absolute_url(def, &raw, def.field_type.expected_format())?;
            check_text_rules(def, &raw, limits)?;
            FieldValue::Url(raw)
        }
        FieldType::Number => {
            let n = parse_number(def, value)?;
            check_numeric_rules(def, n)?;
            FieldValue::Number(n)
        }
        FieldType::Date => {
            let raw = expect_text(def, value)?;
            let date = NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map_err(|_| invalid(def, def.field_type.expected_format()))?;
            FieldValue::Date(date)
        }
        FieldType::File => match value {
            SubmittedValue::File(input) => FieldValue::File(validate_file(def, input, limits)?),
            _ => return Err(invalid(def, def.field_type.expected_format())),
        },
    };

    Ok(Some(validated))
}

fn is_blank(value: &SubmittedValue) -> bool {
    match value {
        SubmittedValue::Text(s) => s.trim().is_empty(),
        SubmittedValue::List(items) => items.iter().all(|s| s.trim().is_empty()),
        SubmittedValue::File(file) => file.is_blank(),
        SubmittedValue::Flag(_) | SubmittedValue::Number(_) => false,
    }
}

fn invalid(def: &FieldDefinition, expected: impl Into<String>) -> FieldViolation {
    FieldViolation::InvalidValue {
        field_name: def.field_name.clone(),
        expected: expected.into(),
    }
}

/// Accepts only URLs with a scheme and a host.
fn check_absolute_url(def: &FieldDefinition, raw: &str, expected: &str) -> Result<(), FieldViolation> {
    match url::Url::parse(raw) {
        Ok(parsed) if parsed.has_host() => Ok(()),
        _ => Err(invalid(def, expected)),
    }
}

/// Returns the trimmed string of a text submission.
fn expect_text(def: &FieldDefinition, value: &SubmittedValue) -> Result<String, FieldViolation> {
    match value {
        SubmittedValue::Text(s) => Ok(s.trim().to_string()),
        _ => Err(invalid(def, def.field_type.expected_format())),
    }
}

fn check_text_rules(
    def: &FieldDefinition,
    text: &str,
    limits: &SubmissionLimits,
) -> Result<(), FieldViolation> {
    let length = text.chars().count();
    if length > limits.max_text_length {
        return Err(invalid(
            def,
            format!("at most {} characters", limits.max_text_length),
        ));
    }

    let Some(rules) = def.validation_rules.as_ref() else {
        return Ok(());
    };
    if let Some(min) = rules.min_length() {
        if length < min {
            return Err(invalid(def, format!("at least {} characters", min)));
        }
    }
    if let Some(max) = rules.max_length() {
        if length > max {
            return Err(invalid(def, format!("at most {} characters", max)));
        }
    }
    if let Some(pattern) = rules.pattern() {
        if !pattern.is_match(text) {
            let source = rules.spec().pattern.as_deref().unwrap_or_default();
            return Err(invalid(def, format!("a value matching {}", source)));
        }
    }
    Ok(())
}

fn check_numeric_rules(def: &FieldDefinition, n: f64) -> Result<(), FieldViolation> {
    let Some(rules) = def.validation_rules.as_ref().map(ValidationRules::spec) else {
        return Ok(());
    };
    match (rules.min, rules.max) {
        (Some(min), Some(max)) if n < min || n > max => {
            Err(invalid(def, format!("a number between {} and {}", min, max)))
        }
        (Some(min), None) if n < min => Err(invalid(def, format!("a number >= {}", min))),
        (None, Some(max)) if n > max => Err(invalid(def, format!("a number <= {}", max))),
        _ => Ok(()),
    }
}

fn check_option(def: &FieldDefinition, choice: &str) -> Result<(), FieldViolation> {
    let Some(options) = def.options.as_ref() else {
        return Err(invalid(def, "a field with declared options"));
    };
    if options.contains(choice) {
        Ok(())
    } else {
        Err(FieldViolation::InvalidOption {
            field_name: def.field_name.clone(),
            value: choice.to_string(),
            allowed: options.to_vec(),
        })
    }
}

/// Decodes a multi-select submission into its selected options in declared
/// order, or `None` when no token remains after trimming.
fn validate_multi_select(
    def: &FieldDefinition,
    value: &SubmittedValue,
) -> Result<Option<Vec<String>>, FieldViolation> {
    let tokens: Vec<String> = match value {
        SubmittedValue::List(items) => items.iter().map(|s| s.trim().to_string()).collect(),
        SubmittedValue::Text(s) => s
            .split(MULTI_VALUE_DELIMITER)
            .map(|t| t.trim().to_string())
            .collect(),
        _ => return Err(invalid(def, def.field_type.expected_format())),
    };

    let Some(options) = def.options.as_ref() else {
        return Err(invalid(def, "a field with declared options"));
    };

    let mut positions = Vec::new();
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        match options.position(token) {
            Some(pos) => positions.push(pos),
            None => {
                return Err(FieldViolation::InvalidOption {
                    field_name: def.field_name.clone(),
                    value: token.clone(),
                    allowed: options.to_vec(),
                })
            }
        }
    }
    if positions.is_empty() {
        return Ok(None);
    }

    positions.sort_unstable();
    positions.dedup();
    let selected = positions
        .into_iter()
        .map(|pos| options.as_slice()[pos].clone())
        .collect();
    Ok(Some(selected))
}

fn parse_boolean(def: &FieldDefinition, value: &SubmittedValue) -> Result<bool, FieldViolation> {
    match value {
        SubmittedValue::Flag(b) => Ok(*b),
        SubmittedValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(invalid(def, def.field_type.expected_format())),
        },
        _ => Err(invalid(def, def.field_type.expected_format())),
    }
}

fn parse_number(def: &FieldDefinition, value: &SubmittedValue) -> Result<f64, FieldViolation> {
    let n = match value {
        SubmittedValue::Number(n) => *n,
        SubmittedValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(def, def.field_type.expected_format()))?,
        _ => return Err(invalid(def, def.field_type.expected_format())),
    };
    if n.is_finite() {
        Ok(n)
    } else {
        Err(invalid(def, def.field_type.expected_format()))
    }
}

fn validate_file(
    def: &FieldDefinition,
    input: &FileAttachmentInput,
    limits: &SubmissionLimits,
) -> Result<FileAttachment, FieldViolation> {
    let required = |member: &Option<String>| {
        member
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| invalid(def, def.field_type.expected_format()))
    };

    let url = required(&input.url)?;
    check_absolute_url(def, &url, "a file descriptor whose url is absolute")?;
    let file_name = required(&input.file_name)?;
    let mime_type = required(&input.mime_type)?;
    let file_size = input
        .file_size
        .ok_or_else(|| invalid(def, def.field_type.expected_format()))?;

    if file_size < 0 {
        return Err(invalid(def, "a non-negative fileSize"));
    }
    if file_size > limits.max_file_size_bytes {
        return Err(invalid(
            def,
            format!("a file of at most {} bytes", limits.max_file_size_bytes),
        ));
    }

    Ok(FileAttachment {
        url,
        file_name,
        file_size,
        mime_type,
    })
}
