// Stats aggregator library; the binary in main.rs embeds it behind HTTP

pub mod aggregator;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod sysinfo_repo;
pub mod version;
pub mod worker;
