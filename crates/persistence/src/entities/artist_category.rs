//! Artist category entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ArtistCategory;

/// Database row mapping for the artist_categories table.
#[derive(Debug, Clone, FromRow)]
pub struct ArtistCategoryEntity {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArtistCategoryEntity> for ArtistCategory {
    fn from(entity: ArtistCategoryEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            display_name: entity.display_name,
            description: entity.description,
            sort_order: entity.sort_order,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
