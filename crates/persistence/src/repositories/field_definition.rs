//! Field definition repository for database operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{FieldDefinitionEntity, FieldTypeDb};
use crate::metrics::QueryTimer;

const DEFINITION_COLUMNS: &str = r#"id, artist_category_id, field_name, display_name, field_type,
       is_required, is_searchable, sort_order, placeholder, help_text,
       options, validation_rules, is_active, created_at, updated_at"#;

/// Input for inserting a field definition.
#[derive(Debug, Clone)]
pub struct FieldDefinitionInput<'a> {
    pub field_name: &'a str,
    pub display_name: &'a str,
    pub field_type: FieldTypeDb,
    pub is_required: bool,
    pub is_searchable: bool,
    pub sort_order: i32,
    pub placeholder: Option<&'a str>,
    pub help_text: Option<&'a str>,
    pub options: Option<serde_json::Value>,
    pub validation_rules: Option<serde_json::Value>,
}

/// Repository for field definition database operations.
#[derive(Clone)]
pub struct FieldDefinitionRepository {
    pool: PgPool,
}

impl FieldDefinitionRepository {
    /// Creates a new FieldDefinitionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Active definitions of a category, ordered by sort order then name.
    pub async fn list_active_for_category(
        &self,
        artist_category_id: Uuid,
    ) -> Result<Vec<FieldDefinitionEntity>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::list_active_in_tx(&mut conn, artist_category_id).await
    }

    /// Loads the active schema of a category on an existing transaction.
    pub async fn list_active_in_tx(
        conn: &mut PgConnection,
        artist_category_id: Uuid,
    ) -> Result<Vec<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_field_definitions");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(&format!(
            r#"
            SELECT {}
            FROM artist_field_definitions
            WHERE artist_category_id = $1 AND is_active = true
            ORDER BY sort_order, field_name
            "#,
            DEFINITION_COLUMNS
        ))
        .bind(artist_category_id)
        .fetch_all(&mut *conn)
        .await;
        timer.record();
        result
    }

    /// Required subset of a category's active definitions, same order.
    pub async fn list_required_for_category(
        &self,
        artist_category_id: Uuid,
    ) -> Result<Vec<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_required_field_definitions");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(&format!(
            r#"
            SELECT {}
            FROM artist_field_definitions
            WHERE artist_category_id = $1 AND is_active = true AND is_required = true
            ORDER BY sort_order, field_name
            "#,
            DEFINITION_COLUMNS
        ))
        .bind(artist_category_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an active definition belonging to a category.
    pub async fn find_active_in_category(
        &self,
        artist_category_id: Uuid,
        id: Uuid,
    ) -> Result<Option<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_field_definition");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(&format!(
            r#"
            SELECT {}
            FROM artist_field_definitions
            WHERE id = $1 AND artist_category_id = $2 AND is_active = true
            "#,
            DEFINITION_COLUMNS
        ))
        .bind(id)
        .bind(artist_category_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether an active definition with this name exists in the category.
    pub async fn active_name_exists(
        &self,
        artist_category_id: Uuid,
        field_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_field_name_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM artist_field_definitions
                WHERE artist_category_id = $1 AND field_name = $2 AND is_active = true
            )
            "#,
        )
        .bind(artist_category_id)
        .bind(field_name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a definition in a category.
    pub async fn create(
        &self,
        artist_category_id: Uuid,
        input: &FieldDefinitionInput<'_>,
    ) -> Result<FieldDefinitionEntity, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_in_tx(&mut conn, artist_category_id, input).await
    }

    /// Insert a definition on an existing connection or transaction.
    pub async fn insert_in_tx(
        conn: &mut PgConnection,
        artist_category_id: Uuid,
        input: &FieldDefinitionInput<'_>,
    ) -> Result<FieldDefinitionEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_field_definition");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(&format!(
            r#"
            INSERT INTO artist_field_definitions (
                artist_category_id, field_name, display_name, field_type,
                is_required, is_searchable, sort_order, placeholder, help_text,
                options, validation_rules
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            DEFINITION_COLUMNS
        ))
        .bind(artist_category_id)
        .bind(input.field_name)
        .bind(input.display_name)
        .bind(input.field_type)
        .bind(input.is_required)
        .bind(input.is_searchable)
        .bind(input.sort_order)
        .bind(input.placeholder)
        .bind(input.help_text)
        .bind(&input.options)
        .bind(&input.validation_rules)
        .fetch_one(&mut *conn)
        .await;
        timer.record();
        result
    }

    /// Soft-delete a definition. Stored values referencing it stay in place.
    pub async fn deactivate(
        &self,
        artist_category_id: Uuid,
        id: Uuid,
    ) -> Result<Option<FieldDefinitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_field_definition");
        let result = sqlx::query_as::<_, FieldDefinitionEntity>(&format!(
            r#"
            UPDATE artist_field_definitions
            SET is_active = false, updated_at = NOW()
            WHERE id = $1 AND artist_category_id = $2 AND is_active = true
            RETURNING {}
            "#,
            DEFINITION_COLUMNS
        ))
        .bind(id)
        .bind(artist_category_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
