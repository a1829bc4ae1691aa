//! Artist category and schema read endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::artist_category::ListCategoriesResponse;
use domain::models::field_definition::{FieldDefinitionResponse, ListFieldsResponse};
use domain::models::field_value::{FieldSearchQuery, FieldSearchResponse};
use domain::models::{ArtistCategory, FieldDefinition, FieldType, SubmittedValue};
use domain::services::validate_submitted_value;
use domain::services::SubmissionLimits;
use domain::FieldSchemaError;
use persistence::entities::into_definitions;
use persistence::repositories::{
    ArtistCategoryRepository, FieldDefinitionRepository, ProfileFieldValueRepository,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Resolves an active category or fails with `CategoryNotFound`.
pub(crate) async fn require_active_category(
    pool: &PgPool,
    category_id: Uuid,
) -> Result<ArtistCategory, ApiError> {
    ArtistCategoryRepository::new(pool.clone())
        .find_active_by_id(category_id)
        .await?
        .map(ArtistCategory::from)
        .ok_or_else(|| FieldSchemaError::CategoryNotFound(category_id.to_string()).into())
}

fn list_response(category_id: Uuid, definitions: &[FieldDefinition]) -> ListFieldsResponse {
    let fields: Vec<FieldDefinitionResponse> =
        definitions.iter().map(FieldDefinitionResponse::from).collect();
    ListFieldsResponse {
        artist_category_id: category_id,
        total: fields.len(),
        fields,
    }
}

/// GET /api/v1/artist-categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ListCategoriesResponse>, ApiError> {
    let categories: Vec<ArtistCategory> = ArtistCategoryRepository::new(state.pool.clone())
        .list_active()
        .await?
        .into_iter()
        .map(ArtistCategory::from)
        .collect();

    Ok(Json(ListCategoriesResponse {
        total: categories.len(),
        categories,
    }))
}

/// GET /api/v1/artist-categories/:category_id
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<ArtistCategory>, ApiError> {
    Ok(Json(require_active_category(&state.pool, category_id).await?))
}

/// GET /api/v1/artist-categories/name/:name
pub async fn get_category_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ArtistCategory>, ApiError> {
    let category = ArtistCategoryRepository::new(state.pool.clone())
        .find_active_by_name(name.trim())
        .await?
        .ok_or(FieldSchemaError::CategoryNotFound(name))?;

    Ok(Json(category.into()))
}

/// GET /api/v1/artist-categories/:category_id/fields
///
/// Active definitions in display order. A category without fields yields an
/// empty list.
pub async fn get_fields_for_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<ListFieldsResponse>, ApiError> {
    require_active_category(&state.pool, category_id).await?;

    let definitions = into_definitions(
        FieldDefinitionRepository::new(state.pool.clone())
            .list_active_for_category(category_id)
            .await?,
    )?;

    Ok(Json(list_response(category_id, &definitions)))
}

/// GET /api/v1/artist-categories/:category_id/fields/required
pub async fn get_required_fields(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<ListFieldsResponse>, ApiError> {
    require_active_category(&state.pool, category_id).await?;

    let definitions = into_definitions(
        FieldDefinitionRepository::new(state.pool.clone())
            .list_required_for_category(category_id)
            .await?,
    )?;

    Ok(Json(list_response(category_id, &definitions)))
}

/// Normalizes a search term the same way a submitted value would be stored,
/// so `"TRUE"` finds `true` and `"5.0"` finds `5`.
fn canonical_search_value(
    definition: &FieldDefinition,
    raw: &str,
    limits: &SubmissionLimits,
) -> Result<String, ApiError> {
    let submitted = match definition.field_type {
        FieldType::MultiSelect => SubmittedValue::List(vec![raw.to_string()]),
        _ => SubmittedValue::Text(raw.to_string()),
    };
    match validate_submitted_value(definition, Some(&submitted), limits) {
        Ok(Some(value)) => value.to_stored().field_value.ok_or_else(|| {
            ApiError::Validation(format!(
                "Field '{}' cannot be searched by value",
                definition.field_name
            ))
        }),
        Ok(None) => Err(ApiError::Validation(
            "Search value must not be blank".to_string(),
        )),
        Err(violation) => Err(FieldSchemaError::Rejected(vec![violation]).into()),
    }
}

/// GET /api/v1/artist-categories/:category_id/fields/:field_id/profiles?value=
///
/// Profiles whose stored value for a searchable field matches. Multi-select
/// fields match when the value is one of the selected options.
pub async fn find_profiles_by_field_value(
    State(state): State<AppState>,
    Path((category_id, field_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<FieldSearchQuery>,
) -> Result<Json<FieldSearchResponse>, ApiError> {
    require_active_category(&state.pool, category_id).await?;

    let entity = FieldDefinitionRepository::new(state.pool.clone())
        .find_active_in_category(category_id, field_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Field definition not found: {}", field_id)))?;
    let definition = FieldDefinition::try_from(entity)?;

    if !definition.is_searchable {
        return Err(ApiError::Validation(format!(
            "Field '{}' is not searchable",
            definition.field_name
        )));
    }

    let limits = state.config.limits.submission_limits();
    let value = canonical_search_value(&definition, &query.value, &limits)?;
    let profile_ids = ProfileFieldValueRepository::new(state.pool.clone())
        .find_profiles_by_field_value(
            definition.id,
            &value,
            definition.field_type == FieldType::MultiSelect,
        )
        .await?;

    debug!(
        field_definition_id = %definition.id,
        matches = profile_ids.len(),
        "Field value search"
    );

    Ok(Json(FieldSearchResponse {
        field_definition_id: definition.id,
        field_name: definition.field_name,
        value,
        total: profile_ids.len(),
        profile_ids,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::FieldOptions;

    fn definition(field_type: FieldType, options: Option<&[&str]>) -> FieldDefinition {
        FieldDefinition {
            id: Uuid::new_v4(),
            artist_category_id: Uuid::new_v4(),
            field_name: "languages".to_string(),
            display_name: "Languages".to_string(),
            field_type,
            is_required: false,
            is_searchable: true,
            sort_order: 1,
            placeholder: None,
            help_text: None,
            options: options.map(|o| {
                FieldOptions::new(o.iter().map(|s| s.to_string()).collect()).unwrap()
            }),
            validation_rules: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_response_counts_fields() {
        let category_id = Uuid::new_v4();
        let defs = vec![
            definition(FieldType::Text, None),
            definition(FieldType::Boolean, None),
        ];
        let response = list_response(category_id, &defs);
        assert_eq!(response.total, 2);
        assert_eq!(response.artist_category_id, category_id);
        assert_eq!(response.fields[1].field_type, FieldType::Boolean);
    }

    #[test]
    fn test_canonical_search_value_normalizes_boolean() {
        let def = definition(FieldType::Boolean, None);
        let value = canonical_search_value(&def, "TRUE", &SubmissionLimits::default()).unwrap();
        assert_eq!(value, "true");
    }

    #[test]
    fn test_canonical_search_value_single_option_token() {
        let def = definition(FieldType::MultiSelect, Some(&["ENGLISH", "HINDI"]));
        let value = canonical_search_value(&def, " HINDI ", &SubmissionLimits::default()).unwrap();
        assert_eq!(value, "HINDI");
    }

    #[test]
    fn test_canonical_search_value_rejects_unknown_option() {
        let def = definition(FieldType::Select, Some(&["SLIM", "ATHLETIC"]));
        let err = canonical_search_value(&def, "HEAVY", &SubmissionLimits::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidFields { .. }));
    }

    #[test]
    fn test_canonical_search_value_rejects_blank() {
        let def = definition(FieldType::Text, None);
        let err = canonical_search_value(&def, "   ", &SubmissionLimits::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_list_response_empty() {
        let response = list_response(Uuid::new_v4(), &[]);
        assert_eq!(response.total, 0);
        assert!(response.fields.is_empty());
    }
}
