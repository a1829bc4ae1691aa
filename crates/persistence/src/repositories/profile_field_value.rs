//! Profile field value repository for database operations.
//!
//! Pool-based methods are plain reads and single-row writes. The `*_in_tx`
//! functions take a connection so that a reconciliation can read and apply
//! inside one transaction.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use domain::models::StoredValue;
use domain::services::ReconciliationPlan;

use crate::entities::{ProfileFieldValueEntity, ProfileFieldValueWithDefinitionEntity};
use crate::metrics::QueryTimer;

const VALUE_COLUMNS: &str = r#"id, artist_profile_id, field_definition_id, field_value,
       file_url, file_name, file_size, mime_type, created_at, updated_at"#;

const VALUES_WITH_DEFINITION_QUERY: &str = r#"
    SELECT v.field_definition_id, v.field_value, v.file_url, v.file_name,
           v.file_size, v.mime_type, v.updated_at,
           d.field_name, d.display_name, d.field_type
    FROM artist_profile_field_values v
    JOIN artist_field_definitions d ON d.id = v.field_definition_id
    WHERE v.artist_profile_id = $1
    ORDER BY d.sort_order, d.field_name
"#;

/// Repository for profile field value database operations.
#[derive(Clone)]
pub struct ProfileFieldValueRepository {
    pool: PgPool,
}

impl ProfileFieldValueRepository {
    /// Creates a new ProfileFieldValueRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Stored values of a profile joined with definition metadata.
    pub async fn get_values(
        &self,
        artist_profile_id: Uuid,
    ) -> Result<Vec<ProfileFieldValueWithDefinitionEntity>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::get_values_in_tx(&mut conn, artist_profile_id).await
    }

    pub async fn get_values_in_tx(
        conn: &mut PgConnection,
        artist_profile_id: Uuid,
    ) -> Result<Vec<ProfileFieldValueWithDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_profile_field_values");
        let result =
            sqlx::query_as::<_, ProfileFieldValueWithDefinitionEntity>(VALUES_WITH_DEFINITION_QUERY)
                .bind(artist_profile_id)
                .fetch_all(&mut *conn)
                .await;
        timer.record();
        result
    }

    /// Insert or update the value of one field on a profile.
    pub async fn upsert_in_tx(
        conn: &mut PgConnection,
        artist_profile_id: Uuid,
        field_definition_id: Uuid,
        value: &StoredValue,
    ) -> Result<ProfileFieldValueEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_profile_field_value");
        let result = sqlx::query_as::<_, ProfileFieldValueEntity>(&format!(
            r#"
            INSERT INTO artist_profile_field_values (
                artist_profile_id, field_definition_id, field_value,
                file_url, file_name, file_size, mime_type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (artist_profile_id, field_definition_id)
            DO UPDATE SET field_value = $3, file_url = $4, file_name = $5,
                          file_size = $6, mime_type = $7, updated_at = NOW()
            RETURNING {}
            "#,
            VALUE_COLUMNS
        ))
        .bind(artist_profile_id)
        .bind(field_definition_id)
        .bind(value.field_value.as_deref())
        .bind(value.file_url.as_deref())
        .bind(value.file_name.as_deref())
        .bind(value.file_size)
        .bind(value.mime_type.as_deref())
        .fetch_one(&mut *conn)
        .await;
        timer.record();
        result
    }

    /// Remove the values of the given definitions from a profile.
    pub async fn delete_many_in_tx(
        conn: &mut PgConnection,
        artist_profile_id: Uuid,
        field_definition_ids: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        if field_definition_ids.is_empty() {
            return Ok(0);
        }
        let timer = QueryTimer::new("delete_profile_field_values");
        let result = sqlx::query(
            r#"
            DELETE FROM artist_profile_field_values
            WHERE artist_profile_id = $1 AND field_definition_id = ANY($2)
            "#,
        )
        .bind(artist_profile_id)
        .bind(field_definition_ids)
        .execute(&mut *conn)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Raw value rows of a profile, used as the reconciliation baseline.
    pub async fn list_for_profile_in_tx(
        conn: &mut PgConnection,
        artist_profile_id: Uuid,
    ) -> Result<Vec<ProfileFieldValueEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_profile_field_values");
        let result = sqlx::query_as::<_, ProfileFieldValueEntity>(&format!(
            "SELECT {} FROM artist_profile_field_values WHERE artist_profile_id = $1",
            VALUE_COLUMNS
        ))
        .bind(artist_profile_id)
        .fetch_all(&mut *conn)
        .await;
        timer.record();
        result
    }

    /// Apply every staged upsert and delete of a plan.
    pub async fn apply_plan_in_tx(
        conn: &mut PgConnection,
        artist_profile_id: Uuid,
        plan: &ReconciliationPlan,
    ) -> Result<(), sqlx::Error> {
        for upsert in &plan.upserts {
            Self::upsert_in_tx(
                conn,
                artist_profile_id,
                upsert.field_definition_id,
                &upsert.stored,
            )
            .await?;
        }
        Self::delete_many_in_tx(conn, artist_profile_id, &plan.deletes).await?;
        Ok(())
    }

    /// Profiles whose value for a definition equals `value`, or, when
    /// `match_token` is set, whose comma-delimited value contains it.
    pub async fn find_profiles_by_field_value(
        &self,
        field_definition_id: Uuid,
        value: &str,
        match_token: bool,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("find_profiles_by_field_value");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT artist_profile_id
            FROM artist_profile_field_values
            WHERE field_definition_id = $1
              AND (field_value = $2
                   OR ($3 AND $2 = ANY(string_to_array(field_value, ','))))
            ORDER BY artist_profile_id
            "#,
        )
        .bind(field_definition_id)
        .bind(value)
        .bind(match_token)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
