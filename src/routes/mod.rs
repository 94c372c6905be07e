// HTTP routes for the embedding server

mod http;

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::StatsAggregator;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<StatsAggregator>,
}

pub fn app(aggregator: Arc<StatsAggregator>) -> Router {
    let state = AppState {
        aggregator: aggregator.clone(),
    };
    let router = Router::new()
        .route("/", get(|| async { "Hello from appstats!" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/monitoring", get(http::monitoring_handler)) // GET /api/monitoring
        .with_state(state);
    track_requests(router, aggregator).layer(CorsLayer::new().allow_origin(Any))
}

/// Wraps every route of `router` so that each request records its latency,
/// and 5xx responses are also logged as errors.
pub fn track_requests(router: Router, aggregator: Arc<StatsAggregator>) -> Router {
    router.layer(middleware::from_fn_with_state(
        aggregator,
        http::track_requests,
    ))
}
