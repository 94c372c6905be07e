// Errors raised by system metric collection

use std::time::Duration;

/// Failure to obtain one host measurement. Never surfaces from a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("measurement unavailable: {0}")]
    Unavailable(String),
    #[error("sysinfo lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("sysinfo task join: {0}")]
    Task(String),
    #[error("collection timed out after {0:?}")]
    Timeout(Duration),
}
