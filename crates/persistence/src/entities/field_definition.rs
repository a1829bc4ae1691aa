//! Field definition entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::field_definition::parse_stored_constraints;
use domain::models::{FieldDefinition, FieldType};
use domain::FieldSchemaError;

/// Database enum for artist_field_type that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "artist_field_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldTypeDb {
    Text,
    Textarea,
    Select,
    MultiSelect,
    Boolean,
    Url,
    File,
    Number,
    Date,
}

impl From<FieldTypeDb> for FieldType {
    fn from(db: FieldTypeDb) -> Self {
        match db {
            FieldTypeDb::Text => FieldType::Text,
            FieldTypeDb::Textarea => FieldType::Textarea,
            FieldTypeDb::Select => FieldType::Select,
            FieldTypeDb::MultiSelect => FieldType::MultiSelect,
            FieldTypeDb::Boolean => FieldType::Boolean,
            FieldTypeDb::Url => FieldType::Url,
            FieldTypeDb::File => FieldType::File,
            FieldTypeDb::Number => FieldType::Number,
            FieldTypeDb::Date => FieldType::Date,
        }
    }
}

impl From<FieldType> for FieldTypeDb {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => FieldTypeDb::Text,
            FieldType::Textarea => FieldTypeDb::Textarea,
            FieldType::Select => FieldTypeDb::Select,
            FieldType::MultiSelect => FieldTypeDb::MultiSelect,
            FieldType::Boolean => FieldTypeDb::Boolean,
            FieldType::Url => FieldTypeDb::Url,
            FieldType::File => FieldTypeDb::File,
            FieldType::Number => FieldTypeDb::Number,
            FieldType::Date => FieldTypeDb::Date,
        }
    }
}

/// Database row mapping for the artist_field_definitions table.
#[derive(Debug, Clone, FromRow)]
pub struct FieldDefinitionEntity {
    pub id: Uuid,
    pub artist_category_id: Uuid,
    pub field_name: String,
    pub display_name: String,
    pub field_type: FieldTypeDb,
    pub is_required: bool,
    pub is_searchable: bool,
    pub sort_order: i32,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub options: Option<serde_json::Value>,
    pub validation_rules: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored option lists and rules are parsed here, once per load. A row that
/// does not parse is a schema defect, not a client error.
impl TryFrom<FieldDefinitionEntity> for FieldDefinition {
    type Error = FieldSchemaError;

    fn try_from(entity: FieldDefinitionEntity) -> Result<Self, Self::Error> {
        let field_type = FieldType::from(entity.field_type);
        let (options, validation_rules) = parse_stored_constraints(
            entity.id,
            field_type,
            entity.options.as_ref(),
            entity.validation_rules.as_ref(),
        )?;

        Ok(Self {
            id: entity.id,
            artist_category_id: entity.artist_category_id,
            field_name: entity.field_name,
            display_name: entity.display_name,
            field_type,
            is_required: entity.is_required,
            is_searchable: entity.is_searchable,
            sort_order: entity.sort_order,
            placeholder: entity.placeholder,
            help_text: entity.help_text,
            options,
            validation_rules,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Converts a batch of loaded rows, failing on the first malformed one.
pub fn into_definitions(
    entities: Vec<FieldDefinitionEntity>,
) -> Result<Vec<FieldDefinition>, FieldSchemaError> {
    entities.into_iter().map(FieldDefinition::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_entity(field_type: FieldTypeDb) -> FieldDefinitionEntity {
        FieldDefinitionEntity {
            id: Uuid::new_v4(),
            artist_category_id: Uuid::new_v4(),
            field_name: "body_type".to_string(),
            display_name: "Body Type".to_string(),
            field_type,
            is_required: false,
            is_searchable: true,
            sort_order: 3,
            placeholder: None,
            help_text: Some("Body type category".to_string()),
            options: None,
            validation_rules: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_field_type_db_round_trip() {
        for field_type in FieldType::ALL {
            assert_eq!(FieldType::from(FieldTypeDb::from(field_type)), field_type);
        }
    }

    #[test]
    fn test_select_entity_parses_options() {
        let mut entity = create_test_entity(FieldTypeDb::Select);
        entity.options = Some(json!(["SLIM", "ATHLETIC", "AVERAGE"]));

        let def = FieldDefinition::try_from(entity).unwrap();
        assert_eq!(def.field_type, FieldType::Select);
        assert!(def.options.unwrap().contains("ATHLETIC"));
        assert!(def.validation_rules.is_none());
    }

    #[test]
    fn test_text_entity_compiles_rules() {
        let mut entity = create_test_entity(FieldTypeDb::Text);
        entity.validation_rules = Some(json!({"maxLength": 10, "pattern": "\\d+cm"}));

        let def = FieldDefinition::try_from(entity).unwrap();
        let rules = def.validation_rules.unwrap();
        assert_eq!(rules.max_length(), Some(10));
        assert!(rules.pattern().unwrap().is_match("180cm"));
    }

    #[test]
    fn test_malformed_options_rejected() {
        let mut entity = create_test_entity(FieldTypeDb::Select);
        entity.options = Some(json!("SLIM,ATHLETIC"));
        let id = entity.id;

        match FieldDefinition::try_from(entity) {
            Err(FieldSchemaError::MalformedSchema {
                field_definition_id,
                ..
            }) => assert_eq!(field_definition_id, id),
            other => panic!("Expected MalformedSchema, got {:?}", other),
        }
    }

    #[test]
    fn test_select_without_options_rejected() {
        let entity = create_test_entity(FieldTypeDb::MultiSelect);
        assert!(FieldDefinition::try_from(entity).is_err());
    }

    #[test]
    fn test_into_definitions_fails_on_any_bad_row() {
        let good = create_test_entity(FieldTypeDb::Text);
        let mut bad = create_test_entity(FieldTypeDb::Number);
        bad.validation_rules = Some(json!({"min": 10, "max": 1}));

        assert_eq!(into_definitions(vec![good.clone()]).unwrap().len(), 1);
        assert!(into_definitions(vec![good, bad]).is_err());
    }
}
