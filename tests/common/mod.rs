// Shared test helpers: scripted metrics providers

#![allow(dead_code)]

use appstats::error::CollectionError;
use appstats::sysinfo_repo::SystemMetricsProvider;
use async_trait::async_trait;
use std::time::Duration;

/// Returns a fixed reading per metric; `None` makes that metric fail.
pub struct ScriptedProvider {
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub network: Option<f64>,
}

impl ScriptedProvider {
    pub fn healthy() -> Self {
        Self {
            cpu: Some(25.0),
            memory: Some(60.0),
            network: Some(2.5),
        }
    }
}

fn reading(v: Option<f64>, what: &str) -> Result<f64, CollectionError> {
    v.ok_or_else(|| CollectionError::Unavailable(format!("{what} not available")))
}

#[async_trait]
impl SystemMetricsProvider for ScriptedProvider {
    async fn cpu_percent(&self) -> Result<f64, CollectionError> {
        reading(self.cpu, "cpu")
    }
    async fn memory_percent(&self) -> Result<f64, CollectionError> {
        reading(self.memory, "memory")
    }
    async fn network_receive_mb(&self) -> Result<f64, CollectionError> {
        reading(self.network, "network")
    }
}

/// CPU collection hangs for `delay`; the other metrics answer immediately.
pub struct SlowCpuProvider {
    pub delay: Duration,
}

#[async_trait]
impl SystemMetricsProvider for SlowCpuProvider {
    async fn cpu_percent(&self) -> Result<f64, CollectionError> {
        tokio::time::sleep(self.delay).await;
        Ok(99.0)
    }
    async fn memory_percent(&self) -> Result<f64, CollectionError> {
        Ok(10.0)
    }
    async fn network_receive_mb(&self) -> Result<f64, CollectionError> {
        Ok(0.5)
    }
}
