//! Global subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::logging::Level;

/// Default filter directive for a level name, e.g. `relay_ops=warn,tower_http=warn`.
pub fn default_directive(level_name: &str) -> String {
    // fatal and panic have no tracing equivalent beyond error.
    let level = Level::resolve(level_name).as_tracing().as_str().to_lowercase();
    format!("relay_ops={level},tower_http={level}")
}

/// Install the process-wide stderr subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns an error
/// if a global subscriber is already installed.
pub fn init(level_name: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(level_name).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
