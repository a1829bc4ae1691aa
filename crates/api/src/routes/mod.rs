//! HTTP route handlers.

pub mod admin_artist_categories;
pub mod artist_categories;
pub mod artist_profiles;
pub mod health;
