//! Backend version discovery.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::VersionConfig;

/// Header carrying the version on a backend ping response.
pub const BACKEND_VERSION_HEADER: &str = "x-influxdb-version";

/// Errors from a single ping probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("ping request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("ping returned status {0}")]
    Status(StatusCode),
}

/// Ping the backend and read its version header.
///
/// Only `200 OK` and `204 No Content` count as an answer. A missing header
/// yields an empty version.
pub async fn fetch_backend_version(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, ProbeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
        return Err(ProbeError::Status(status));
    }

    let version = response
        .headers()
        .get(BACKEND_VERSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    tracing::info!(version = %version, "Backend version");
    Ok(version)
}

/// Probe the backend, returning an empty string on any failure.
pub async fn probe_version(url: &str, timeout: Duration) -> String {
    let result = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => fetch_backend_version(&client, url).await,
        Err(e) => Err(ProbeError::from(e)),
    };

    result.unwrap_or_else(|e| {
        tracing::error!(url = %url, error = %e, "Backend version probe failed");
        String::new()
    })
}

/// Resolve the backend version: environment override, then probe, then fallback.
pub async fn discover_version(config: &VersionConfig) -> String {
    discover_version_with(std::env::var(&config.env_var).ok(), config).await
}

/// [`discover_version`] with the environment value supplied by the caller.
pub async fn discover_version_with(env_value: Option<String>, config: &VersionConfig) -> String {
    if let Some(version) = env_value.filter(|v| !v.is_empty()) {
        return version;
    }

    let timeout = Duration::from_secs(config.probe_timeout_secs);
    let version = probe_version(&config.probe_url, timeout).await;
    if version.is_empty() {
        config.fallback.clone()
    } else {
        version
    }
}
