use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{admin_artist_categories, artist_categories, artist_profiles, health};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: config.clone(),
    };

    let category_routes = Router::new()
        .route(
            "/api/v1/artist-categories",
            get(artist_categories::list_categories),
        )
        .route(
            "/api/v1/artist-categories/name/:name",
            get(artist_categories::get_category_by_name),
        )
        .route(
            "/api/v1/artist-categories/:category_id",
            get(artist_categories::get_category),
        )
        .route(
            "/api/v1/artist-categories/:category_id/fields",
            get(artist_categories::get_fields_for_category),
        )
        .route(
            "/api/v1/artist-categories/:category_id/fields/required",
            get(artist_categories::get_required_fields),
        )
        .route(
            "/api/v1/artist-categories/:category_id/fields/:field_id/profiles",
            get(artist_categories::find_profiles_by_field_value),
        );

    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/artist-categories",
            post(admin_artist_categories::create_category),
        )
        .route(
            "/api/v1/admin/artist-categories/:category_id",
            delete(admin_artist_categories::deactivate_category),
        )
        .route(
            "/api/v1/admin/artist-categories/:category_id/fields",
            post(admin_artist_categories::define_field),
        )
        .route(
            "/api/v1/admin/artist-categories/:category_id/fields/:field_id",
            delete(admin_artist_categories::deactivate_field),
        );

    let profile_routes = Router::new()
        .route(
            "/api/v1/artist-profiles",
            post(artist_profiles::register_profile),
        )
        .route(
            "/api/v1/artist-profiles/:profile_id",
            get(artist_profiles::get_profile).delete(artist_profiles::delete_profile),
        )
        .route(
            "/api/v1/artist-profiles/:profile_id/fields",
            get(artist_profiles::get_fields).put(artist_profiles::reconcile_fields),
        );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(category_routes)
        .merge(admin_routes)
        .merge(profile_routes)
        // Bottom layers run first.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config.security.cors_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_builds_for_listed_origins() {
        let _ = cors_layer(&["https://casting.example.com".to_string()]);
        let _ = cors_layer(&[]);
    }
}
