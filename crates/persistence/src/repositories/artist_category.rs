//! Artist category repository for database operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::ArtistCategoryEntity;
use crate::metrics::QueryTimer;

const CATEGORY_COLUMNS: &str =
    "id, name, display_name, description, sort_order, is_active, created_at, updated_at";

/// Input for inserting a category.
#[derive(Debug, Clone)]
pub struct CategoryInput<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub description: Option<&'a str>,
    pub sort_order: i32,
}

/// Repository for artist category database operations.
#[derive(Clone)]
pub struct ArtistCategoryRepository {
    pool: PgPool,
}

impl ArtistCategoryRepository {
    /// Creates a new ArtistCategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List active categories in display order.
    pub async fn list_active(&self) -> Result<Vec<ArtistCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_artist_categories");
        let result = sqlx::query_as::<_, ArtistCategoryEntity>(&format!(
            "SELECT {} FROM artist_categories WHERE is_active = true ORDER BY sort_order, name",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an active category by ID.
    pub async fn find_active_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ArtistCategoryEntity>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::find_active_in_tx(&mut conn, id).await
    }

    /// Find an active category by ID on an existing connection or transaction.
    pub async fn find_active_in_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<ArtistCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_artist_category");
        let result = sqlx::query_as::<_, ArtistCategoryEntity>(&format!(
            "SELECT {} FROM artist_categories WHERE id = $1 AND is_active = true",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await;
        timer.record();
        result
    }

    /// Find an active category by machine name (case-insensitive).
    pub async fn find_active_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ArtistCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_artist_category_by_name");
        let result = sqlx::query_as::<_, ArtistCategoryEntity>(&format!(
            "SELECT {} FROM artist_categories WHERE UPPER(name) = UPPER($1) AND is_active = true",
            CATEGORY_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a category.
    pub async fn create(
        &self,
        input: &CategoryInput<'_>,
    ) -> Result<ArtistCategoryEntity, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_in_tx(&mut conn, input).await
    }

    /// Insert a category on an existing connection or transaction.
    pub async fn insert_in_tx(
        conn: &mut PgConnection,
        input: &CategoryInput<'_>,
    ) -> Result<ArtistCategoryEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_artist_category");
        let result = sqlx::query_as::<_, ArtistCategoryEntity>(&format!(
            r#"
            INSERT INTO artist_categories (name, display_name, description, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(input.name)
        .bind(input.display_name)
        .bind(input.description)
        .bind(input.sort_order)
        .fetch_one(&mut *conn)
        .await;
        timer.record();
        result
    }

    /// Soft-delete a category. Returns None when it does not exist or is already inactive.
    pub async fn deactivate(&self, id: Uuid) -> Result<Option<ArtistCategoryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_artist_category");
        let result = sqlx::query_as::<_, ArtistCategoryEntity>(&format!(
            r#"
            UPDATE artist_categories
            SET is_active = false, updated_at = NOW()
            WHERE id = $1 AND is_active = true
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count all categories, active or not, on an existing transaction.
    pub async fn count_in_tx(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_artist_categories");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM artist_categories")
            .fetch_one(&mut *conn)
            .await;
        timer.record();
        result
    }
}
