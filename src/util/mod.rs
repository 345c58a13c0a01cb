//! Small helpers shared across the relay.

pub mod channel;

pub use channel::{collect_channel, collect_unbounded};
