//! Seeds the standard artist categories on first start.
//!
//! Runs after migrations. Does nothing once any category exists, so an
//! operator who curates the catalog by hand never sees it reappear.

use domain::services::{standard_categories, CategorySeed};
use domain::FieldSchemaError;
use persistence::entities::FieldTypeDb;
use persistence::repositories::{
    ArtistCategoryRepository, CategoryInput, FieldDefinitionInput, FieldDefinitionRepository,
};
use sqlx::{PgConnection, PgPool};
use tracing::info;

/// Arbitrary advisory lock key serializing seeders across instances.
const SEED_LOCK_KEY: i64 = 0x0a57_5eed;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid seed for category {category}: {source}")]
    InvalidSeed {
        category: &'static str,
        source: FieldSchemaError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub fields: usize,
}

/// Inserts every standard category with its fields in one transaction.
/// Returns an empty summary when the catalog is already populated.
pub async fn seed_artist_categories(pool: &PgPool) -> Result<SeedSummary, SeedError> {
    seed_categories(pool, standard_categories()).await
}

async fn seed_categories(
    pool: &PgPool,
    seeds: &[CategorySeed],
) -> Result<SeedSummary, SeedError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SEED_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let existing = ArtistCategoryRepository::count_in_tx(&mut tx).await?;
    if existing > 0 {
        info!(existing, "Artist categories present - skipping seed");
        return Ok(SeedSummary::default());
    }

    let mut summary = SeedSummary::default();
    for seed in seeds {
        summary.fields += insert_category(&mut tx, seed).await?;
        summary.categories += 1;
    }

    tx.commit().await?;

    info!(
        categories = summary.categories,
        fields = summary.fields,
        "Seeded standard artist categories"
    );
    Ok(summary)
}

async fn insert_category(conn: &mut PgConnection, seed: &CategorySeed) -> Result<usize, SeedError> {
    let request = seed.to_request();
    let category = ArtistCategoryRepository::insert_in_tx(
        conn,
        &CategoryInput {
            name: &request.name,
            display_name: &request.display_name,
            description: request.description.as_deref(),
            sort_order: request.sort_order,
        },
    )
    .await?;

    for field in seed.fields {
        let request = field.to_request();
        let (options, rules) = request
            .constraints()
            .map_err(|source| SeedError::InvalidSeed {
                category: seed.name,
                source,
            })?;

        FieldDefinitionRepository::insert_in_tx(
            conn,
            category.id,
            &FieldDefinitionInput {
                field_name: &request.field_name,
                display_name: &request.display_name,
                field_type: FieldTypeDb::from(request.field_type),
                is_required: request.is_required,
                is_searchable: request.is_searchable,
                sort_order: request.sort_order,
                placeholder: request.placeholder.as_deref(),
                help_text: request.help_text.as_deref(),
                options: options.as_ref().map(|o| o.to_json()),
                validation_rules: rules.as_ref().map(|r| r.to_json()),
            },
        )
        .await?;
    }

    Ok(seed.fields.len())
}
