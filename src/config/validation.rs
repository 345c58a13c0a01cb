//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem is
//! reported, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid server.bind_address {0:?}")]
    BindAddress(String),

    #[error("invalid version.probe_url {url:?}: {reason}")]
    ProbeUrl { url: String, reason: String },

    #[error("version.probe_timeout_secs must be greater than zero")]
    ProbeTimeout,

    #[error("version.env_var must not be empty")]
    EnvVar,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }

    let version = &config.version;
    match Url::parse(&version.probe_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::ProbeUrl {
            url: version.probe_url.clone(),
            reason: format!("unsupported scheme {}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::ProbeUrl {
            url: version.probe_url.clone(),
            reason: e.to_string(),
        }),
    }

    if version.probe_timeout_secs == 0 {
        errors.push(ValidationError::ProbeTimeout);
    }

    if version.env_var.is_empty() {
        errors.push(ValidationError::EnvVar);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
