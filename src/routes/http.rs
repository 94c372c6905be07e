// GET handlers and the request-tracking middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;

use super::AppState;
use crate::aggregator::StatsAggregator;
use crate::version::version_info;

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(version_info())
}

/// GET /api/monitoring — counters plus live host metrics.
pub(super) async fn monitoring_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.aggregator.snapshot().await)
}

/// Records latency for every request; server errors also go to the error log.
pub(super) async fn track_requests(
    State(aggregator): State<Arc<StatsAggregator>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    aggregator.record_request(elapsed_ms);
    let status = response.status();
    if status.is_server_error() {
        tracing::debug!(%method, %path, status = status.as_u16(), "request failed");
        aggregator.record_error(status, Some(&method), Some(&path));
    }
    response
}
