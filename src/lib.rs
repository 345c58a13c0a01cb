//! Operational helpers for an InfluxDB write relay.
//!
//! - `logging`: sink registry and leveled logger factory
//! - `http`: client identity, ping headers, the HTTP surface
//! - `discovery`: backend version probe
//! - `config`, `lifecycle`, `observability`: service plumbing

pub mod config;
pub mod discovery;
pub mod http;
pub mod lifecycle;
pub mod logging;
pub mod observability;
pub mod util;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use logging::{Level, Logger, SinkRegistry};
