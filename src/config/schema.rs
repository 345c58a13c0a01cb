//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::logging::OpenFailurePolicy;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Log files and levels.
    pub logging: LoggingConfig,

    /// Service and backend version discovery.
    pub version: VersionConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:9096").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9096".to_string(),
        }
    }
}

/// Log file configuration.
///
/// Empty file names log to stderr. Relative names are resolved against
/// `log_dir`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base directory for relative log paths.
    pub log_dir: String,

    /// Main service log.
    pub main_file: String,

    /// Main log level (debug, info, warn, error, fatal, panic).
    pub main_level: String,

    /// Access log, one line per HTTP request.
    pub access_file: String,

    pub access_level: String,

    /// What to do when a log file cannot be opened.
    pub open_failure: OpenFailurePolicy,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "/var/log/relay".to_string(),
            main_file: String::new(),
            main_level: "info".to_string(),
            access_file: String::new(),
            access_level: "info".to_string(),
            open_failure: OpenFailurePolicy::Discard,
        }
    }
}

/// Version discovery settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Version reported as `X-Influx-SRelay-Version`.
    pub service_version: String,

    /// Environment variable that overrides the probed backend version.
    pub env_var: String,

    /// Ping endpoint of the local backend.
    pub probe_url: String,

    /// Probe request timeout in seconds.
    pub probe_timeout_secs: u64,

    /// Backend version used when neither the env var nor the probe yields one.
    pub fallback: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            env_var: "INFLUXDB_VERSION".to_string(),
            probe_url: "http://127.0.0.1:8086/ping".to_string(),
            probe_timeout_secs: 5,
            fallback: "relay".to_string(),
        }
    }
}
