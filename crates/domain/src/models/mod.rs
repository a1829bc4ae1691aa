//! Domain models for the artist field schema service.

pub mod artist_category;
pub mod artist_profile;
pub mod field_definition;
pub mod field_type;
pub mod field_value;

pub use artist_category::ArtistCategory;
pub use artist_profile::ArtistProfile;
pub use field_definition::{FieldDefinition, FieldOptions, ValidationRules, ValidationRulesSpec};
pub use field_type::FieldType;
pub use field_value::{FieldValue, StoredValue, SubmittedValue};
