// Domain models: live counters and the snapshot wire format

mod monitoring;
mod stats;

pub use monitoring::{DatabaseMetrics, MonitoringResponse, RequestMetrics, SystemMetrics};
pub use stats::{ErrorLog, MAX_ERROR_LOGS, Stats};
