//! Ping response headers.

use axum::http::header::{HeaderName, InvalidHeaderValue, CONTENT_LENGTH};
use axum::http::{HeaderMap, HeaderValue};

/// Backend (InfluxDB) version header.
pub const X_INFLUXDB_VERSION: HeaderName = HeaderName::from_static("x-influxdb-version");

/// Relay version header.
pub const X_INFLUX_SRELAY_VERSION: HeaderName = HeaderName::from_static("x-influx-srelay-version");

/// Append the version headers and an explicit zero content length.
pub fn add_ping_headers(
    headers: &mut HeaderMap,
    backend_version: &str,
    relay_version: &str,
) -> Result<(), InvalidHeaderValue> {
    headers.append(X_INFLUXDB_VERSION, HeaderValue::from_str(backend_version)?);
    headers.append(X_INFLUX_SRELAY_VERSION, HeaderValue::from_str(relay_version)?);
    headers.append(CONTENT_LENGTH, HeaderValue::from_static("0"));
    Ok(())
}
