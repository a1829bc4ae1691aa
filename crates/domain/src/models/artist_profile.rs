//! Artist profile registry model.
//!
//! Profiles themselves live in an external profile service; this registry only
//! binds a profile id to the artist category whose schema governs its fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Binding of a profile to its (immutable) artist category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    pub id: Uuid,
    pub artist_category_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request payload for registering a profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfileRequest {
    /// Profile id assigned by the profile service; generated when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub artist_category_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_optional_id() {
        let category = Uuid::new_v4();
        let json = format!(r#"{{"artistCategoryId":"{}"}}"#, category);
        let req: RegisterProfileRequest = serde_json::from_str(&json).unwrap();
        assert!(req.id.is_none());
        assert_eq!(req.artist_category_id, category);
    }

    #[test]
    fn test_register_request_missing_category_fails() {
        let result: Result<RegisterProfileRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
