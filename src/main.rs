//! API service entry point.
//!
//! ```text
//! --config <file.toml>
//!     → config::load_config (parse + validate; fatal on error)
//!     → observability::logging::init (console / rolling file)
//!     → Logger (shared, read-only)
//!     → lifecycle::startup::serve (bind, serve, drain on SIGINT/SIGTERM)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use api_services::config::load_config;
use api_services::lifecycle::{signals, startup, Shutdown};
use api_services::observability::{logging, metrics, Logger};

#[derive(Parser)]
#[command(name = "api-services")]
#[command(about = "API service with correlation ids and uniform response envelopes", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config/api-services.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let _logging = logging::init(&config.logger)?;
    let logger = Arc::new(Logger::new(&config.logger));

    tracing::info!(
        config = %cli.config.display(),
        bind_address = %config.server.bind_address(),
        env = %config.server.env,
        "Configuration loaded"
    );

    if config.metrics.enabled {
        match config.metrics.address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    startup::log_server_error(&logger, &e);
                }
            }
            Err(e) => startup::log_server_error(&logger, &e),
        }
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    match startup::serve(config, logger, &shutdown).await {
        startup::ServeOutcome::Stopped => tracing::info!("Shutdown complete"),
        startup::ServeOutcome::Degraded(e) => {
            tracing::warn!(error = %e, "Shutdown after running degraded")
        }
    }
    Ok(())
}
