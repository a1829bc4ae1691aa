//! Prometheus metrics: HTTP middleware, business counters and the scrape
//! endpoint.

use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{header, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::app::AppState;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Outcome label for `profile_field_reconciliations_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    Applied,
    Unchanged,
    Rejected,
    Failed,
}

impl ReconciliationOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ReconciliationOutcome::Applied => "applied",
            ReconciliationOutcome::Unchanged => "unchanged",
            ReconciliationOutcome::Rejected => "rejected",
            ReconciliationOutcome::Failed => "failed",
        }
    }
}

/// Records `http_requests_total` and `http_request_duration_seconds`,
/// labelled by the matched route rather than the raw path.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = method_label(req.method());
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;

    counter!(
        "http_requests_total",
        "method" => method,
        "path" => path.clone(),
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(start.elapsed().as_secs_f64());

    response
}

fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::PATCH => "PATCH",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "OTHER",
    }
}

pub fn record_reconciliation(outcome: ReconciliationOutcome) {
    counter!(
        "profile_field_reconciliations_total",
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Counts rows touched by an applied reconciliation.
pub fn record_value_changes(inserted: usize, updated: usize, deleted: usize) {
    counter!("profile_field_values_changed_total", "change" => "inserted").increment(inserted as u64);
    counter!("profile_field_values_changed_total", "change" => "updated").increment(updated as u64);
    counter!("profile_field_values_changed_total", "change" => "deleted").increment(deleted as u64);
}

pub fn record_field_defined(field_type: &'static str) {
    counter!("artist_field_definitions_created_total", "type" => field_type).increment(1);
}

/// Installs the global recorder. A second call is a no-op so tests that
/// build several apps share the first handle.
pub fn init_metrics() -> Result<(), BuildError> {
    static INIT: Mutex<()> = Mutex::new(());
    let _guard = INIT.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if PROMETHEUS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .set_buckets(DURATION_BUCKETS)?
        .install_recorder()?;
    let _ = PROMETHEUS_HANDLE.set(handle);
    Ok(())
}

/// `GET /metrics`. Pool gauges are refreshed on every scrape.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    persistence::metrics::PoolUsage::of(&state.pool).publish();

    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            "Metrics recorder not installed".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_label() {
        assert_eq!(method_label(&Method::GET), "GET");
        assert_eq!(method_label(&Method::PUT), "PUT");
        assert_eq!(method_label(&Method::DELETE), "DELETE");
        assert_eq!(method_label(&Method::TRACE), "OTHER");
    }

    #[test]
    fn test_reconciliation_outcome_labels() {
        assert_eq!(ReconciliationOutcome::Applied.as_str(), "applied");
        assert_eq!(ReconciliationOutcome::Unchanged.as_str(), "unchanged");
        assert_eq!(ReconciliationOutcome::Rejected.as_str(), "rejected");
        assert_eq!(ReconciliationOutcome::Failed.as_str(), "failed");
    }

    #[test]
    fn test_init_metrics_is_idempotent() {
        assert!(init_metrics().is_ok());
        assert!(init_metrics().is_ok());
        assert!(PROMETHEUS_HANDLE.get().is_some());
    }
}
