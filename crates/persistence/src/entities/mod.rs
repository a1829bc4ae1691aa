//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod artist_category;
pub mod artist_profile;
pub mod field_definition;
pub mod profile_field_value;

pub use artist_category::ArtistCategoryEntity;
pub use artist_profile::ArtistProfileEntity;
pub use field_definition::{into_definitions, FieldDefinitionEntity, FieldTypeDb};
pub use profile_field_value::{ProfileFieldValueEntity, ProfileFieldValueWithDefinitionEntity};
