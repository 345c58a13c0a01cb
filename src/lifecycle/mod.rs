//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Install subscriber → Open log sinks → Discover version → Listen
//!
//! Shutdown:
//!     Signal received (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → HTTP server drains → SinkRegistry::close_all
//! ```
//!
//! # Design Decisions
//! - Log sinks close last so the drain is still logged
//! - Shutdown never fails because a log file could not be closed

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
