//! Process-wide diagnostics.
//!
//! # Data Flow
//! ```text
//! All subsystems (registry, probe, server):
//!     → tracing macros
//!     → global subscriber (EnvFilter + fmt) → stderr
//!
//! Per-stream loggers (main log, access log) bypass this path and write
//! through their own dispatch; see crate::logging.
//! ```

pub mod logging;
