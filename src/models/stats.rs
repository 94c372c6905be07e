// Mutable counters owned by the aggregator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Capacity of the recent-error log; the oldest entry is evicted first.
pub const MAX_ERROR_LOGS: usize = 10;

/// One recorded request failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLog {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub request_count: u64,
    pub error_count: u64,
    /// Sum of request durations, in the caller's unit (ms by convention).
    pub total_latency: f64,
    pub db_query_count: u64,
    pub db_error_count: u64,
    pub db_total_latency: f64,
    /// Oldest first, never longer than [`MAX_ERROR_LOGS`].
    pub last_errors: VecDeque<ErrorLog>,
}

impl Stats {
    /// Appends `entry`, evicting the oldest log when already at capacity.
    pub fn push_error_log(&mut self, entry: ErrorLog) {
        if self.last_errors.len() >= MAX_ERROR_LOGS {
            self.last_errors.pop_front();
        }
        self.last_errors.push_back(entry);
    }

    /// Percentage of requests that did not count as errors; 0 with no requests.
    pub fn success_rate(&self) -> f64 {
        if self.request_count == 0 {
            return 0.0;
        }
        let total = self.request_count as f64;
        (total - self.error_count as f64) * 100.0 / total
    }

    pub fn avg_request_latency(&self) -> f64 {
        average(self.total_latency, self.request_count)
    }

    pub fn avg_db_latency(&self) -> f64 {
        average(self.db_total_latency, self.db_query_count)
    }
}

fn average(total: f64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}
