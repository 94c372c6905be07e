// Background task that periodically logs the aggregated counters.

use crate::aggregator::StatsAggregator;
use std::sync::Arc;
use tokio::time::{Duration, interval};

pub struct WorkerConfig {
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

pub fn spawn(
    aggregator: Arc<StatsAggregator>,
    config: WorkerConfig,
    mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    let stats_log_interval = Duration::from_secs(config.stats_log_interval_secs);

    tokio::spawn(async move {
        let mut stats_log_tick = interval(stats_log_interval);
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = stats_log_tick.tick() => {
                    let stats = aggregator.stats();
                    tracing::info!(
                        requests_total = stats.request_count,
                        request_errors_total = stats.error_count,
                        avg_latency_ms = stats.avg_request_latency(),
                        db_queries_total = stats.db_query_count,
                        db_errors_total = stats.db_error_count,
                        "app stats"
                    );
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
            }
        }
    })
}
