//! Profile field value domain models.
//!
//! Values travel in three shapes:
//! - [`SubmittedValue`]: what a client sends (loosely typed JSON)
//! - [`FieldValue`]: a value validated against its field type
//! - [`StoredValue`]: the canonical column encoding of one value row

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::field_type::FieldType;

/// Delimiter used to store multi-select values in a single text column.
pub const MULTI_VALUE_DELIMITER: char = ',';

/// Date format accepted and stored for DATE fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Metadata of a file attached to a FILE field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
}

/// A field value validated against its definition's type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// TEXT, TEXTAREA and SELECT values.
    Text(String),
    /// Selected options in declared option order.
    MultiSelect(Vec<String>),
    Boolean(bool),
    Url(String),
    Number(f64),
    Date(NaiveDate),
    File(FileAttachment),
}

impl FieldValue {
    /// Canonical column encoding of the value.
    pub fn to_stored(&self) -> StoredValue {
        let text = |s: String| StoredValue {
            field_value: Some(s),
            ..Default::default()
        };

        match self {
            FieldValue::Text(s) | FieldValue::Url(s) => text(s.clone()),
            FieldValue::MultiSelect(values) => {
                text(values.join(&MULTI_VALUE_DELIMITER.to_string()))
            }
            FieldValue::Boolean(b) => text(b.to_string()),
            FieldValue::Number(n) => text(n.to_string()),
            FieldValue::Date(d) => text(d.format(DATE_FORMAT).to_string()),
            FieldValue::File(file) => StoredValue {
                field_value: None,
                file_url: Some(file.url.clone()),
                file_name: Some(file.file_name.clone()),
                file_size: Some(file.file_size),
                mime_type: Some(file.mime_type.clone()),
            },
        }
    }
}

/// The value columns of one stored field value row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredValue {
    pub field_value: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

/// File descriptor as submitted by a client. Members may be missing; a
/// partially filled descriptor is rejected during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileAttachmentInput {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl FileAttachmentInput {
    /// True when no member carries any content.
    pub fn is_blank(&self) -> bool {
        let blank = |s: &Option<String>| s.as_deref().map_or(true, |v| v.trim().is_empty());
        blank(&self.url)
            && blank(&self.file_name)
            && blank(&self.mime_type)
            && self.file_size.is_none()
    }
}

/// A value as submitted by a client, before type validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    File(FileAttachmentInput),
}

/// One submitted `{fieldDefinitionId, value}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSubmission {
    pub field_definition_id: Uuid,
    #[serde(default)]
    pub value: Option<SubmittedValue>,
}

/// Request to replace a profile's dynamic fields.
///
/// The submission is the complete desired state: fields that are omitted
/// (or blank) are removed from the profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProfileFieldsRequest {
    #[serde(default)]
    pub fields: Vec<FieldSubmission>,
}

/// A stored value joined with its definition, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFieldRecord {
    pub field_definition_id: Uuid,
    pub field_name: String,
    pub display_name: String,
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Response for reading a profile's dynamic fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFieldsResponse {
    pub profile_id: Uuid,
    pub artist_category_id: Uuid,
    pub fields: Vec<ProfileFieldRecord>,
}

/// Row counts produced by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl ChangeSummary {
    /// True when the reconciliation touched no rows.
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.updated == 0 && self.deleted == 0
    }
}

/// Response after reconciling a profile's dynamic fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileProfileFieldsResponse {
    pub profile_id: Uuid,
    pub artist_category_id: Uuid,
    pub fields: Vec<ProfileFieldRecord>,
    pub changes: ChangeSummary,
}

/// Query for the searchable-field profile lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSearchQuery {
    pub value: String,
}

/// Response for the searchable-field profile lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSearchResponse {
    pub field_definition_id: Uuid,
    pub field_name: String,
    pub value: String,
    pub profile_ids: Vec<Uuid>,
    pub total: usize,
}
