// Request/database counters plus host metrics, combined on demand into a snapshot.
// Updates and the snapshot read share one mutex; provider calls run outside it.

use crate::error::CollectionError;
use crate::models::{
    DatabaseMetrics, ErrorLog, MonitoringResponse, RequestMetrics, Stats, SystemMetrics,
};
use crate::sysinfo_repo::SystemMetricsProvider;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Default upper bound for a single host metric collection.
pub const DEFAULT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared, explicitly passed stats state. Wrap in `Arc` and hand a clone to
/// every task that records.
pub struct StatsAggregator {
    stats: Mutex<Stats>,
    provider: Arc<dyn SystemMetricsProvider>,
    collection_timeout: Duration,
}

impl StatsAggregator {
    pub fn new(provider: Arc<dyn SystemMetricsProvider>) -> Self {
        Self::with_collection_timeout(provider, DEFAULT_COLLECTION_TIMEOUT)
    }

    pub fn with_collection_timeout(
        provider: Arc<dyn SystemMetricsProvider>,
        collection_timeout: Duration,
    ) -> Self {
        Self {
            stats: Mutex::new(Stats::default()),
            provider,
            collection_timeout,
        }
    }

    // Every update leaves Stats consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Stats> {
        self.stats.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Counts one completed request. Negative durations are accepted but
    /// skew the average latency.
    pub fn record_request(&self, duration_ms: f64) {
        let mut stats = self.lock();
        stats.request_count += 1;
        stats.total_latency += duration_ms;
    }

    /// Counts one request failure and appends it to the recent-error log.
    /// Independent of `record_request`: callers decide whether to call both.
    pub fn record_error(&self, error: impl Display, method: Option<&str>, path: Option<&str>) {
        let error = error.to_string();
        let method = method.unwrap_or_default().to_string();
        let path = path.unwrap_or_default().to_string();
        let mut stats = self.lock();
        stats.error_count += 1;
        // Stamped under the lock so log order matches timestamp order
        stats.push_error_log(ErrorLog {
            timestamp: chrono::Utc::now(),
            method,
            path,
            error,
        });
    }

    pub fn record_db_query(&self, duration_ms: f64) {
        let mut stats = self.lock();
        stats.db_query_count += 1;
        stats.db_total_latency += duration_ms;
    }

    /// Database errors are counted only; they never enter the error log.
    pub fn record_db_error(&self) {
        self.lock().db_error_count += 1;
    }

    /// Copy of the current counters.
    pub fn stats(&self) -> Stats {
        self.lock().clone()
    }

    /// Counters plus freshly collected host metrics. Never fails: a metric
    /// that cannot be collected is reported as 0 and logged.
    pub async fn snapshot(&self) -> MonitoringResponse {
        let limit = self.collection_timeout;
        let (cpu_usage, memory_usage, network_recv) = tokio::join!(
            collect_or_zero("cpu_percent", limit, self.provider.cpu_percent()),
            collect_or_zero("memory_percent", limit, self.provider.memory_percent()),
            collect_or_zero("network_receive_mb", limit, self.provider.network_receive_mb()),
        );

        let stats = self.lock();
        MonitoringResponse {
            requests: RequestMetrics {
                total: stats.request_count,
                errors: stats.error_count,
                success_rate: stats.success_rate(),
                avg_latency_ms: stats.avg_request_latency(),
            },
            database: DatabaseMetrics {
                total_queries: stats.db_query_count,
                errors: stats.db_error_count,
                avg_latency_ms: stats.avg_db_latency(),
            },
            system: SystemMetrics {
                cpu_usage,
                memory_usage,
                network_recv,
            },
            last_errors: Some(stats.last_errors.iter().cloned().collect()),
        }
    }
}

async fn collect_or_zero<F>(operation: &'static str, limit: Duration, fut: F) -> f64
where
    F: Future<Output = Result<f64, CollectionError>>,
{
    let result = match tokio::time::timeout(limit, fut).await {
        Ok(r) => r,
        Err(_) => Err(CollectionError::Timeout(limit)),
    };
    match result {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, operation, "system metric collection failed");
            0.0
        }
    }
}
