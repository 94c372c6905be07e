// Snapshot returned to callers (JSON camelCase)

use serde::{Deserialize, Serialize};

use super::ErrorLog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetrics {
    pub total: u64,
    pub errors: u64,
    pub success_rate: f64,
    pub avg_latency_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseMetrics {
    pub total_queries: u64,
    pub errors: u64,
    pub avg_latency_ms: f64,
}

/// Host metrics; a field is 0 when its collection failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    /// Megabytes received per second across all interfaces.
    pub network_recv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringResponse {
    pub requests: RequestMetrics,
    pub database: DatabaseMetrics,
    pub system: SystemMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_errors: Option<Vec<ErrorLog>>,
}
