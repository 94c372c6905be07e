// Host metrics via sysinfo

use crate::error::CollectionError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::{Networks, System};
use tracing::instrument;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Source of the three host measurements in a snapshot. Each call is
/// independent; a failure in one says nothing about the others.
#[async_trait]
pub trait SystemMetricsProvider: Send + Sync {
    /// Global CPU usage, 0–100.
    async fn cpu_percent(&self) -> Result<f64, CollectionError>;
    /// Used memory as a percentage of total.
    async fn memory_percent(&self) -> Result<f64, CollectionError>;
    /// Megabytes received per second across all interfaces.
    async fn network_receive_mb(&self) -> Result<f64, CollectionError>;
}

pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
    networks: Arc<Mutex<Networks>>,
    last_cpu_refresh: Arc<Mutex<Option<(Instant, f64)>>>,
    last_network: Arc<Mutex<Option<(u64, Instant)>>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            networks: Arc::new(Mutex::new(networks)),
            last_cpu_refresh: Arc::new(Mutex::new(None)),
            last_network: Arc::new(Mutex::new(None)),
        }
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> CollectionError {
    CollectionError::LockPoisoned(e.to_string())
}

fn join_error(e: tokio::task::JoinError) -> CollectionError {
    CollectionError::Task(e.to_string())
}

/// Bytes/sec between two cumulative readings, in MB/s.
pub(crate) fn receive_rate_mb(prev_bytes: u64, bytes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    bytes.saturating_sub(prev_bytes) as f64 / elapsed_secs / BYTES_PER_MB
}

#[async_trait]
impl SystemMetricsProvider for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_percent"))]
    async fn cpu_percent(&self) -> Result<f64, CollectionError> {
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys.lock().map_err(poisoned)?;
            let mut guard = last_cpu_refresh.lock().map_err(poisoned)?;
            let now = Instant::now();
            let previous = *guard;
            let usage = match previous {
                Some((prev_ts, prev_usage))
                    if now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                {
                    // Too soon for a meaningful delta; reuse the last reading
                    prev_usage
                }
                Some(_) => {
                    sys.refresh_cpu_all();
                    let usage = sys.global_cpu_usage() as f64;
                    *guard = Some((now, usage));
                    usage
                }
                None => {
                    // First call establishes the baseline
                    sys.refresh_cpu_all();
                    *guard = Some((now, 0.0));
                    0.0
                }
            };
            if sys.cpus().is_empty() {
                return Err(CollectionError::Unavailable("no CPUs reported".into()));
            }
            Ok(usage.clamp(0.0, 100.0))
        })
        .await
        .map_err(join_error)?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "memory_percent"))]
    async fn memory_percent(&self) -> Result<f64, CollectionError> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys.lock().map_err(poisoned)?;
            sys.refresh_memory();

            let total = sys.total_memory();
            if total == 0 {
                return Err(CollectionError::Unavailable("total memory is 0".into()));
            }
            let used = total.saturating_sub(sys.available_memory());
            Ok((used as f64 / total as f64) * 100.0)
        })
        .await
        .map_err(join_error)?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "network_receive_mb"))]
    async fn network_receive_mb(&self) -> Result<f64, CollectionError> {
        let networks = self.networks.clone();
        let last_network = self.last_network.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks_guard = networks.lock().map_err(poisoned)?;
            networks_guard.refresh(true);
            if networks_guard.list().is_empty() {
                return Err(CollectionError::Unavailable(
                    "no network interfaces".into(),
                ));
            }
            let received: u64 = networks_guard
                .list()
                .values()
                .map(|data| data.total_received())
                .sum();

            let now = Instant::now();
            let mut guard = last_network.lock().map_err(poisoned)?;
            let rate = guard.map_or(0.0, |(prev_bytes, prev_ts)| {
                receive_rate_mb(prev_bytes, received, now.duration_since(prev_ts).as_secs_f64())
            });
            *guard = Some((received, now));
            Ok(rate)
        })
        .await
        .map_err(join_error)?
    }
}
