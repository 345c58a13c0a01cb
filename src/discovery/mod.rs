//! Version discovery.
//!
//! # Data Flow
//! ```text
//! INFLUXDB_VERSION set?  → use it
//! else GET probe_url      → X-Influxdb-Version on 200/204
//! else                    → static fallback ("relay")
//! ```
//!
//! # Design Decisions
//! - Best effort: discovery never fails startup, every error is logged
//! - Single attempt with a timeout; no retries

pub mod version;

pub use version::{
    discover_version, discover_version_with, fetch_backend_version, probe_version, ProbeError,
};
