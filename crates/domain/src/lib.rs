//! Domain layer for the artist schema backend.
//!
//! This crate contains:
//! - Domain models (categories, field definitions, field values, profiles)
//! - Schema-driven validation and reconciliation planning
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::{FieldSchemaError, FieldViolation};
