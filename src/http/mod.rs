//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace)
//!     → access log middleware
//!         → identity.rs (source address, username)
//!     → /ping → ping.rs (version headers)
//!     → access logger
//! ```

pub mod identity;
pub mod ping;
pub mod server;

pub use identity::{source_from_request, user_from_request};
pub use ping::add_ping_headers;
pub use server::{build_router, AppState, HttpServer};
