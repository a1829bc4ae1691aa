//! Repository implementations for database operations.

pub mod artist_category;
pub mod artist_profile;
pub mod field_definition;
pub mod profile_field_value;

pub use artist_category::{ArtistCategoryRepository, CategoryInput};
pub use artist_profile::ArtistProfileRepository;
pub use field_definition::{FieldDefinitionInput, FieldDefinitionRepository};
pub use profile_field_value::ProfileFieldValueRepository;
