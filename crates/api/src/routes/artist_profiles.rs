//! Artist profile registry and dynamic field values.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::artist_profile::RegisterProfileRequest;
use domain::models::field_value::{
    ProfileFieldsResponse, ReconcileProfileFieldsResponse, SubmitProfileFieldsRequest,
};
use domain::models::ArtistProfile;
use domain::FieldSchemaError;
use persistence::repositories::ArtistProfileRepository;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::artist_categories::require_active_category;
use crate::services::{get_profile_fields, reconcile_profile_fields};

/// POST /api/v1/artist-profiles
///
/// Binds a profile id to a category. Repeating the call with the same
/// category returns the existing binding with 200.
pub async fn register_profile(
    State(state): State<AppState>,
    Json(request): Json<RegisterProfileRequest>,
) -> Result<(StatusCode, Json<ArtistProfile>), ApiError> {
    require_active_category(&state.pool, request.artist_category_id).await?;

    let profile_id = request.id.unwrap_or_else(Uuid::new_v4);
    let (entity, created) = ArtistProfileRepository::new(state.pool.clone())
        .register(profile_id, request.artist_category_id)
        .await?;

    if entity.artist_category_id != request.artist_category_id {
        return Err(FieldSchemaError::ProfileCategoryConflict { profile_id }.into());
    }

    let status = if created {
        info!(
            profile_id = %profile_id,
            category_id = %entity.artist_category_id,
            "Artist profile registered"
        );
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(entity.into())))
}

/// GET /api/v1/artist-profiles/:profile_id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ArtistProfile>, ApiError> {
    let entity = ArtistProfileRepository::new(state.pool.clone())
        .find_by_id(profile_id)
        .await?
        .ok_or(FieldSchemaError::ProfileNotFound(profile_id))?;

    Ok(Json(entity.into()))
}

/// DELETE /api/v1/artist-profiles/:profile_id
///
/// Removes the binding and every stored value of the profile.
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = ArtistProfileRepository::new(state.pool.clone())
        .delete(profile_id)
        .await?;

    if !deleted {
        return Err(FieldSchemaError::ProfileNotFound(profile_id).into());
    }

    info!(profile_id = %profile_id, "Artist profile deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/artist-profiles/:profile_id/fields
pub async fn get_fields(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ProfileFieldsResponse>, ApiError> {
    Ok(Json(get_profile_fields(&state.pool, profile_id).await?))
}

/// PUT /api/v1/artist-profiles/:profile_id/fields
///
/// Full replace: fields absent from the body are removed from the profile.
/// The submission is applied entirely or not at all.
pub async fn reconcile_fields(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(request): Json<SubmitProfileFieldsRequest>,
) -> Result<Json<ReconcileProfileFieldsResponse>, ApiError> {
    let limits = &state.config.limits;
    if request.fields.len() > limits.max_fields_per_submission {
        return Err(ApiError::Validation(format!(
            "A submission may contain at most {} fields, got {}",
            limits.max_fields_per_submission,
            request.fields.len()
        )));
    }

    let response = reconcile_profile_fields(
        &state.pool,
        profile_id,
        &request.fields,
        &limits.submission_limits(),
    )
    .await?;

    Ok(Json(response))
}
