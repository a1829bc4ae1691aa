//! Domain error types for the field schema engine.

use thiserror::Error;
use uuid::Uuid;

/// A single reason a submitted field set was rejected.
///
/// Violations are collected rather than short-circuited so that a client
/// sees every problem with a submission in one response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldViolation {
    #[error("Field {field_definition_id} is not part of this artist category's schema")]
    UnknownField { field_definition_id: Uuid },

    #[error(
        "Field '{field_name}' does not allow '{value}'; expected one of: {}",
        .allowed.join(", ")
    )]
    InvalidOption {
        field_name: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Field '{field_name}' has an invalid value: expected {expected}")]
    InvalidValue { field_name: String, expected: String },

    #[error("Missing required fields: {}", .field_names.join(", "))]
    MissingRequiredFields { field_names: Vec<String> },
}

impl FieldViolation {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "unknown_field",
            Self::InvalidOption { .. } => "invalid_option",
            Self::InvalidValue { .. } => "invalid_value",
            Self::MissingRequiredFields { .. } => "missing_required_fields",
        }
    }

    /// The field (or fields) the violation refers to.
    pub fn field(&self) -> String {
        match self {
            Self::UnknownField {
                field_definition_id,
            } => field_definition_id.to_string(),
            Self::InvalidOption { field_name, .. } | Self::InvalidValue { field_name, .. } => {
                field_name.clone()
            }
            Self::MissingRequiredFields { field_names } => field_names.join(","),
        }
    }
}

/// Errors raised by the schema store, the value store and the reconciler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldSchemaError {
    #[error("Artist category not found: {0}")]
    CategoryNotFound(String),

    #[error("Artist profile not found: {0}")]
    ProfileNotFound(Uuid),

    #[error("Field '{field_name}' already exists in this artist category")]
    DuplicateField { field_name: String },

    #[error("Artist profile {profile_id} is already registered with a different category")]
    ProfileCategoryConflict { profile_id: Uuid },

    #[error("Invalid field definition: {0}")]
    InvalidDefinition(String),

    #[error("Stored definition {field_definition_id} is malformed: {reason}")]
    MalformedSchema {
        field_definition_id: Uuid,
        reason: String,
    },

    #[error("Submission rejected with {} violation(s)", .0.len())]
    Rejected(Vec<FieldViolation>),
}
