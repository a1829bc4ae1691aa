//! Artist profile registry entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ArtistProfile;

/// Database row mapping for the artist_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ArtistProfileEntity {
    pub id: Uuid,
    pub artist_category_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ArtistProfileEntity> for ArtistProfile {
    fn from(entity: ArtistProfileEntity) -> Self {
        Self {
            id: entity.id,
            artist_category_id: entity.artist_category_id,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_entity_to_domain() {
        let entity = ArtistProfileEntity {
            id: Uuid::new_v4(),
            artist_category_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let profile: ArtistProfile = entity.clone().into();
        assert_eq!(profile.id, entity.id);
        assert_eq!(profile.artist_category_id, entity.artist_category_id);
    }
}
