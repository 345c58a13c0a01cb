//! Log sinks and leveled loggers.
//!
//! # Data Flow
//! ```text
//! startup:
//!     SinkRegistry::set_base_directory / set_service_version
//!     → create_logger(path, level) per output stream
//!         → resolve path (empty = stderr, relative = base dir)
//!         → open for append, record LogSink in registry
//!         → Logger (console format, threshold)
//!
//! shutdown:
//!     SinkRegistry::close_all
//!         → release every handle in registration order
//!         → Vec<SinkError> for the ones that failed
//! ```
//!
//! # Design Decisions
//! - Registry is an explicit value, so tests can run several side by side
//! - Logging failures are reported, never allowed to abort the service
//! - Unknown level names fall back to info

pub mod factory;
pub mod level;
pub mod logger;
pub mod registry;

pub use factory::resolve_log_path;
pub use level::Level;
pub use logger::{LogTarget, Logger};
pub use registry::{LogSink, OpenFailurePolicy, SinkError, SinkHandle, SinkRegistry};
