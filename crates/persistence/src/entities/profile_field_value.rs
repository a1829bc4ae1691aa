//! Profile field value entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::field_value::ProfileFieldRecord;
use domain::models::StoredValue;
use domain::services::ExistingValue;

use super::FieldTypeDb;

/// Database row mapping for the artist_profile_field_values table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileFieldValueEntity {
    pub id: Uuid,
    pub artist_profile_id: Uuid,
    pub field_definition_id: Uuid,
    pub field_value: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileFieldValueEntity> for ExistingValue {
    fn from(entity: ProfileFieldValueEntity) -> Self {
        Self {
            field_definition_id: entity.field_definition_id,
            stored: StoredValue {
                field_value: entity.field_value,
                file_url: entity.file_url,
                file_name: entity.file_name,
                file_size: entity.file_size,
                mime_type: entity.mime_type,
            },
        }
    }
}

/// Stored value joined with its definition's display metadata.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileFieldValueWithDefinitionEntity {
    // Value fields
    pub field_definition_id: Uuid,
    pub field_value: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub updated_at: DateTime<Utc>,
    // Definition fields
    pub field_name: String,
    pub display_name: String,
    pub field_type: FieldTypeDb,
}

impl From<ProfileFieldValueWithDefinitionEntity> for ProfileFieldRecord {
    fn from(entity: ProfileFieldValueWithDefinitionEntity) -> Self {
        Self {
            field_definition_id: entity.field_definition_id,
            field_name: entity.field_name,
            display_name: entity.display_name,
            field_type: entity.field_type.into(),
            field_value: entity.field_value,
            file_url: entity.file_url,
            file_name: entity.file_name,
            file_size: entity.file_size,
            mime_type: entity.mime_type,
            updated_at: entity.updated_at,
        }
    }
}
