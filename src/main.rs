//! relay-ops
//!
//! Runs the relay's HTTP surface with file-backed main and access logs.
//!
//! ```text
//!   CLI / relay.toml ──▶ RelayConfig
//!                            │
//!                            ▼
//!   SinkRegistry ──create_logger──▶ main log, access log
//!        │                               │
//!        │          ┌────────────────────┘
//!        │          ▼
//!        │    HttpServer (/ping, access log) ◀── backend version probe
//!        │          │
//!        │     SIGINT/SIGTERM → drain
//!        ▼          │
//!   close_all ◀─────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use relay_ops::config::{load_config, validate_config, ConfigError, RelayConfig};
use relay_ops::discovery::discover_version;
use relay_ops::http::{AppState, HttpServer};
use relay_ops::lifecycle::{signals, Shutdown};
use relay_ops::logging::SinkRegistry;
use relay_ops::observability;

#[derive(Parser)]
#[command(name = "relay-ops")]
#[command(about = "InfluxDB relay front end with managed log files", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listener address, overrides server.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Base directory for relative log paths.
    #[arg(long)]
    log_dir: Option<String>,

    /// Main log file; empty logs to stderr.
    #[arg(long)]
    log_file: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    /// Access log file; empty logs to stderr.
    #[arg(long)]
    access_log: Option<String>,

    #[arg(long)]
    access_level: Option<String>,
}

impl Cli {
    fn load(self) -> Result<RelayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RelayConfig::default(),
        };

        let logging = &mut config.logging;
        let overrides = [
            (self.log_dir, &mut logging.log_dir),
            (self.log_file, &mut logging.main_file),
            (self.log_level, &mut logging.main_level),
            (self.access_log, &mut logging.access_file),
            (self.access_level, &mut logging.access_level),
            (self.bind, &mut config.server.bind_address),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().load()?;
    observability::logging::init(&config.logging.main_level)?;

    tracing::info!("relay-ops v{} starting", env!("CARGO_PKG_VERSION"));

    let mut registry = SinkRegistry::new();
    registry.set_base_directory(&config.logging.log_dir);
    registry.set_service_version(&config.version.service_version);
    registry.set_open_failure_policy(config.logging.open_failure);

    let result = serve(&config, &mut registry).await;

    let failures = registry.close_all();
    if !failures.is_empty() {
        tracing::warn!(failed = failures.len(), "Some log files did not close cleanly");
    }

    result?;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn serve(config: &RelayConfig, registry: &mut SinkRegistry) -> std::io::Result<()> {
    let main_log = registry.create_logger(&config.logging.main_file, &config.logging.main_level);
    let access_log =
        registry.create_logger(&config.logging.access_file, &config.logging.access_level);

    let backend_version = discover_version(&config.version).await;
    main_log.info(format_args!(
        "relay {} fronting backend version {backend_version}",
        registry.service_version()
    ));

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    main_log.info(format_args!("listening on {}", listener.local_addr()?));

    let shutdown = Arc::new(Shutdown::new());
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move { signals::trigger_on_signal(&signal_shutdown).await });

    let state = AppState {
        main: main_log.clone(),
        access: access_log,
        backend_version: Arc::from(backend_version),
        relay_version: Arc::from(registry.service_version()),
    };
    HttpServer::new(state).run(listener, shutdown.subscribe()).await?;

    main_log.info("server drained, closing log files");
    Ok(())
}
