//! Domain services for the artist field schema service.
//!
//! Services contain business logic that operates on domain models.

pub mod category_catalog;
pub mod field_validation;
pub mod reconciliation;

pub use category_catalog::{standard_categories, CategorySeed, FieldSeed};
pub use field_validation::{validate_submitted_value, SubmissionLimits};
pub use reconciliation::{
    plan_reconciliation, ExistingValue, ReconciliationPlan, SchemaSnapshot, StagedUpsert,
    UpsertKind,
};
