//! Field type vocabulary for dynamic profile fields.

use serde::{Deserialize, Serialize};

/// Primitive kind of a dynamic profile field.
///
/// Determines how a submitted value is interpreted and what counts as valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
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

impl FieldType {
    /// All field types, in declaration order.
    pub const ALL: [FieldType; 9] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::MultiSelect,
        FieldType::Boolean,
        FieldType::Url,
        FieldType::File,
        FieldType::Number,
        FieldType::Date,
    ];

    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Textarea => "TEXTAREA",
            FieldType::Select => "SELECT",
            FieldType::MultiSelect => "MULTI_SELECT",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Url => "URL",
            FieldType::File => "FILE",
            FieldType::Number => "NUMBER",
            FieldType::Date => "DATE",
        }
    }

    /// Whether the field draws its values from a declared option list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::MultiSelect)
    }

    /// Whether length and pattern rules apply to this type.
    pub fn supports_text_rules(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea | FieldType::Url)
    }

    /// Whether numeric bound rules apply to this type.
    pub fn supports_numeric_rules(&self) -> bool {
        matches!(self, FieldType::Number)
    }

    /// Human-readable description of an acceptable value, used in error messages.
    pub fn expected_format(&self) -> &'static str {
        match self {
            FieldType::Text | FieldType::Textarea => "a text value",
            FieldType::Select => "one of the declared options",
            FieldType::MultiSelect => "one or more of the declared options",
            FieldType::Boolean => "a boolean (true or false)",
            FieldType::Url => "an absolute URL such as https://example.com/reel",
            FieldType::File => "a file descriptor with url, fileName, fileSize and mimeType",
            FieldType::Number => "a finite number",
            FieldType::Date => "a date in YYYY-MM-DD format",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
