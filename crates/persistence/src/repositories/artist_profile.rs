//! Artist profile registry repository.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::ArtistProfileEntity;
use crate::metrics::QueryTimer;

/// Repository for the profile → category registry.
#[derive(Clone)]
pub struct ArtistProfileRepository {
    pool: PgPool,
}

impl ArtistProfileRepository {
    /// Creates a new ArtistProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Register a profile. An existing registration with the same id is left
    /// untouched and returned with `created = false`.
    pub async fn register(
        &self,
        id: Uuid,
        artist_category_id: Uuid,
    ) -> Result<(ArtistProfileEntity, bool), sqlx::Error> {
        let timer = QueryTimer::new("register_artist_profile");
        let inserted = sqlx::query_as::<_, ArtistProfileEntity>(
            r#"
            INSERT INTO artist_profiles (id, artist_category_id)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, artist_category_id, created_at
            "#,
        )
        .bind(id)
        .bind(artist_category_id)
        .fetch_optional(&self.pool)
        .await?;

        let result = match inserted {
            Some(entity) => Ok((entity, true)),
            None => sqlx::query_as::<_, ArtistProfileEntity>(
                "SELECT id, artist_category_id, created_at FROM artist_profiles WHERE id = $1",
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map(|entity| (entity, false)),
        };
        timer.record();
        result
    }

    /// Find a profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ArtistProfileEntity>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::find_in_tx(&mut conn, id).await
    }

    /// Find a profile by ID on an existing connection or transaction.
    async fn find_in_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<ArtistProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_artist_profile");
        let result = sqlx::query_as::<_, ArtistProfileEntity>(
            "SELECT id, artist_category_id, created_at FROM artist_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await;
        timer.record();
        result
    }

    /// Find a profile and hold its row lock until the transaction ends.
    /// Reconciliations of the same profile queue here; other profiles do not.
    pub async fn lock_in_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<ArtistProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("lock_artist_profile");
        let result = sqlx::query_as::<_, ArtistProfileEntity>(
            "SELECT id, artist_category_id, created_at FROM artist_profiles WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await;
        timer.record();
        result
    }

    /// Delete a profile; its field values cascade. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_artist_profile");
        let result = sqlx::query("DELETE FROM artist_profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
