//! Shared utilities and common types for the artist schema backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Machine-name and option-token validation
//! - Shared validation error helpers

pub mod validation;
