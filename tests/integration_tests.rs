// Integration tests: HTTP endpoints and request-tracking middleware

mod common;

use appstats::aggregator::StatsAggregator;
use appstats::models::MonitoringResponse;
use appstats::routes;
use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use common::ScriptedProvider;
use std::sync::Arc;

fn test_aggregator() -> Arc<StatsAggregator> {
    Arc::new(StatsAggregator::new(Arc::new(ScriptedProvider::healthy())))
}

#[tokio::test]
async fn test_root_endpoint() {
    let server = TestServer::new(routes::app(test_aggregator()));
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("Hello from appstats!");
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = TestServer::new(routes::app(test_aggregator()));
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("name").and_then(|v| v.as_str()),
        Some("appstats")
    );
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_monitoring_endpoint_returns_snapshot() {
    let aggregator = test_aggregator();
    aggregator.record_db_query(30.0);
    aggregator.record_error("db timeout", Some("GET"), Some("/orders"));
    let server = TestServer::new(routes::app(aggregator));

    let response = server.get("/api/monitoring").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["database"]["totalQueries"], 1);
    assert_eq!(json["database"]["avgLatencyMs"], 30.0);
    assert_eq!(json["system"]["cpuUsage"], 25.0);
    assert_eq!(json["lastErrors"][0]["path"], "/orders");
    assert_eq!(json["lastErrors"][0]["error"], "db timeout");
}

#[tokio::test]
async fn test_middleware_counts_every_request() {
    let aggregator = test_aggregator();
    let server = TestServer::new(routes::app(aggregator.clone()));

    server.get("/").await.assert_status_ok();
    server.get("/version").await.assert_status_ok();
    server.get("/").await.assert_status_ok();

    // The snapshot is taken before its own request is recorded.
    let snap: MonitoringResponse = server.get("/api/monitoring").await.json();
    assert_eq!(snap.requests.total, 3);
    assert_eq!(snap.requests.errors, 0);
    assert_eq!(aggregator.stats().request_count, 4);
}

#[tokio::test]
async fn test_middleware_logs_server_errors() {
    let aggregator = test_aggregator();
    let router = Router::new()
        .route("/ok", get(|| async { "fine" }))
        .route(
            "/boom",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let server = TestServer::new(routes::track_requests(router, aggregator.clone()));

    server.get("/ok").await.assert_status_ok();
    server
        .get("/boom")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let stats = aggregator.stats();
    assert_eq!(stats.request_count, 2);
    assert_eq!(stats.error_count, 1);
    let log = &stats.last_errors[0];
    assert_eq!(log.method, "GET");
    assert_eq!(log.path, "/boom");
    assert_eq!(log.error, "500 Internal Server Error");
}
