//! Profile field reads and full-replace reconciliation.
//!
//! A reconciliation runs in a single transaction holding the profile's row
//! lock: resolve the profile's category, snapshot its active schema,
//! plan against the stored rows, apply, read back, commit. Any failure rolls
//! the whole submission back.

use domain::models::field_value::{
    FieldSubmission, ProfileFieldRecord, ProfileFieldsResponse, ReconcileProfileFieldsResponse,
};
use domain::services::{plan_reconciliation, ExistingValue, SchemaSnapshot, SubmissionLimits};
use domain::FieldSchemaError;
use persistence::entities::into_definitions;
use persistence::repositories::{
    ArtistCategoryRepository, ArtistProfileRepository, FieldDefinitionRepository,
    ProfileFieldValueRepository,
};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::metrics::{record_reconciliation, record_value_changes, ReconciliationOutcome};

/// First attempt plus one retry on a transient database failure.
const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Domain(#[from] FieldSchemaError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ReconcileError> for ApiError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::Domain(e) => e.into(),
            ReconcileError::Database(e) => e.into(),
        }
    }
}

/// Serialization failures and deadlocks are worth one more try.
fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => matches!(db.code().as_deref(), Some("40001") | Some("40P01")),
        _ => false,
    }
}

/// Stored values of a profile with their definition metadata.
pub async fn get_profile_fields(
    pool: &PgPool,
    profile_id: Uuid,
) -> Result<ProfileFieldsResponse, ReconcileError> {
    let profile = ArtistProfileRepository::new(pool.clone())
        .find_by_id(profile_id)
        .await?
        .ok_or(FieldSchemaError::ProfileNotFound(profile_id))?;

    let fields = ProfileFieldValueRepository::new(pool.clone())
        .get_values(profile_id)
        .await?
        .into_iter()
        .map(ProfileFieldRecord::from)
        .collect();

    Ok(ProfileFieldsResponse {
        profile_id,
        artist_category_id: profile.artist_category_id,
        fields,
    })
}

/// Replaces the profile's value set with `submissions`.
pub async fn reconcile_profile_fields(
    pool: &PgPool,
    profile_id: Uuid,
    submissions: &[FieldSubmission],
    limits: &SubmissionLimits,
) -> Result<ReconcileProfileFieldsResponse, ReconcileError> {
    let mut attempt = 1;
    let result = loop {
        match reconcile_once(pool, profile_id, submissions, limits).await {
            Err(ReconcileError::Database(e)) if attempt < MAX_ATTEMPTS && is_transient(&e) => {
                warn!(
                    profile_id = %profile_id,
                    attempt,
                    error = %e,
                    "Transient failure during reconciliation, retrying"
                );
                attempt += 1;
            }
            other => break other,
        }
    };

    match &result {
        Ok(response) => {
            let changes = &response.changes;
            if changes.is_noop() {
                record_reconciliation(ReconciliationOutcome::Unchanged);
            } else {
                record_reconciliation(ReconciliationOutcome::Applied);
                record_value_changes(changes.inserted, changes.updated, changes.deleted);
            }
            info!(
                profile_id = %profile_id,
                inserted = changes.inserted,
                updated = changes.updated,
                deleted = changes.deleted,
                unchanged = changes.unchanged,
                attempt,
                "Profile fields reconciled"
            );
        }
        Err(ReconcileError::Domain(FieldSchemaError::Rejected(violations))) => {
            record_reconciliation(ReconciliationOutcome::Rejected);
            info!(
                profile_id = %profile_id,
                violations = violations.len(),
                "Profile field submission rejected"
            );
        }
        Err(ReconcileError::Domain(_)) => {
            record_reconciliation(ReconciliationOutcome::Rejected);
        }
        Err(ReconcileError::Database(e)) => {
            record_reconciliation(ReconciliationOutcome::Failed);
            warn!(profile_id = %profile_id, attempt, error = %e, "Reconciliation failed");
        }
    }

    result
}

async fn reconcile_once(
    pool: &PgPool,
    profile_id: Uuid,
    submissions: &[FieldSubmission],
    limits: &SubmissionLimits,
) -> Result<ReconcileProfileFieldsResponse, ReconcileError> {
    let mut tx = pool.begin().await?;

    let profile = ArtistProfileRepository::lock_in_tx(&mut tx, profile_id)
        .await?
        .ok_or(FieldSchemaError::ProfileNotFound(profile_id))?;
    let category_id = profile.artist_category_id;

    ArtistCategoryRepository::find_active_in_tx(&mut tx, category_id)
        .await?
        .ok_or_else(|| FieldSchemaError::CategoryNotFound(category_id.to_string()))?;

    let definitions =
        into_definitions(FieldDefinitionRepository::list_active_in_tx(&mut tx, category_id).await?)?;
    let snapshot = SchemaSnapshot::new(category_id, definitions);

    let existing: Vec<ExistingValue> =
        ProfileFieldValueRepository::list_for_profile_in_tx(&mut tx, profile_id)
            .await?
            .into_iter()
            .map(ExistingValue::from)
            .collect();

    let plan = plan_reconciliation(&snapshot, &existing, submissions, limits)?;
    if !plan.is_noop() {
        ProfileFieldValueRepository::apply_plan_in_tx(&mut tx, profile_id, &plan).await?;
    }

    let fields = ProfileFieldValueRepository::get_values_in_tx(&mut tx, profile_id)
        .await?
        .into_iter()
        .map(ProfileFieldRecord::from)
        .collect();

    tx.commit().await?;

    Ok(ReconcileProfileFieldsResponse {
        profile_id,
        artist_category_id: category_id,
        fields,
        changes: plan.change_summary(),
    })
}
