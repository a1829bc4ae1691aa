//! Schema administration: categories and their field definitions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::artist_category::CreateCategoryRequest;
use domain::models::field_definition::{DefineFieldRequest, FieldDefinitionResponse};
use domain::models::{ArtistCategory, FieldDefinition, FieldOptions, ValidationRules};
use domain::FieldSchemaError;
use persistence::entities::FieldTypeDb;
use persistence::repositories::{
    ArtistCategoryRepository, CategoryInput, FieldDefinitionInput, FieldDefinitionRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_field_defined;
use crate::routes::artist_categories::require_active_category;

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// POST /api/v1/admin/artist-categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ArtistCategory>), ApiError> {
    request.validate()?;

    let repo = ArtistCategoryRepository::new(state.pool.clone());
    let input = CategoryInput {
        name: &request.name,
        display_name: request.display_name.trim(),
        description: request.description.as_deref().map(str::trim),
        sort_order: request.sort_order,
    };

    let category = repo.create(&input).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict(format!("Artist category '{}' already exists", request.name))
        } else {
            e.into()
        }
    })?;

    info!(
        category_id = %category.id,
        name = %category.name,
        "Artist category created"
    );

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// DELETE /api/v1/admin/artist-categories/:category_id
///
/// Soft delete. Profiles bound to the category keep their stored values but
/// can no longer be reconciled.
pub async fn deactivate_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ArtistCategoryRepository::new(state.pool.clone())
        .deactivate(category_id)
        .await?
        .ok_or_else(|| FieldSchemaError::CategoryNotFound(category_id.to_string()))?;

    info!(category_id = %category_id, "Artist category deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/artist-categories/:category_id/fields
pub async fn define_field(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(request): Json<DefineFieldRequest>,
) -> Result<(StatusCode, Json<FieldDefinitionResponse>), ApiError> {
    request.validate()?;
    let (options, rules) = request.constraints()?;

    require_active_category(&state.pool, category_id).await?;

    let repo = FieldDefinitionRepository::new(state.pool.clone());
    let duplicate = || FieldSchemaError::DuplicateField {
        field_name: request.field_name.clone(),
    };
    if repo
        .active_name_exists(category_id, &request.field_name)
        .await?
    {
        return Err(duplicate().into());
    }

    let input = FieldDefinitionInput {
        field_name: &request.field_name,
        display_name: request.display_name.trim(),
        field_type: FieldTypeDb::from(request.field_type),
        is_required: request.is_required,
        is_searchable: request.is_searchable,
        sort_order: request.sort_order,
        placeholder: request.placeholder.as_deref(),
        help_text: request.help_text.as_deref(),
        options: options.as_ref().map(FieldOptions::to_json),
        validation_rules: rules.as_ref().map(ValidationRules::to_json),
    };

    // A concurrent define of the same name loses on the partial unique index.
    let entity = repo.create(category_id, &input).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::from(duplicate())
        } else {
            ApiError::from(e)
        }
    })?;
    let definition = FieldDefinition::try_from(entity)?;

    record_field_defined(definition.field_type.as_str());
    info!(
        category_id = %category_id,
        field_definition_id = %definition.id,
        field_name = %definition.field_name,
        field_type = %definition.field_type,
        "Field definition created"
    );

    Ok((
        StatusCode::CREATED,
        Json(FieldDefinitionResponse::from(&definition)),
    ))
}

/// DELETE /api/v1/admin/artist-categories/:category_id/fields/:field_id
///
/// Retires the definition. Existing values stay stored until the profile's
/// next reconciliation removes them.
pub async fn deactivate_field(
    State(state): State<AppState>,
    Path((category_id, field_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    FieldDefinitionRepository::new(state.pool.clone())
        .deactivate(category_id, field_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Field definition not found: {}", field_id)))?;

    info!(
        category_id = %category_id,
        field_definition_id = %field_id,
        "Field definition deactivated"
    );
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn test_define_request_rejects_options_on_text() {
        let request: DefineFieldRequest = serde_json::from_value(serde_json::json!({
            "fieldName": "bio",
            "displayName": "Bio",
            "fieldType": "TEXT",
            "options": ["A"]
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        let err: ApiError = request.constraints().unwrap_err().into();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
