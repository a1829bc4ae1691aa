//! Application services orchestrating repositories and domain logic.

pub mod category_seed;
pub mod profile_fields;

pub use category_seed::{seed_artist_categories, SeedError, SeedSummary};
pub use profile_fields::{get_profile_fields, reconcile_profile_fields, ReconcileError};
