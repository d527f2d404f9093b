//! Startup orchestration.
//!
//! Configuration problems are fatal and are handled before this point. Once
//! the process is configured, a failure to bind or serve is logged and the
//! process stays up (degraded) until shutdown, so it can still be inspected.

use std::fmt;
use std::sync::Arc;

use serde_json::json;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::Logger;

const MODULE: &str = "lifecycle::startup";

/// How [`serve`] ended.
#[derive(Debug)]
pub enum ServeOutcome {
    /// The server ran and drained after the shutdown signal.
    Stopped,
    /// The server failed; the process waited for shutdown instead of exiting.
    Degraded(std::io::Error),
}

/// Bind the configured address and serve until `shutdown` fires.
pub async fn serve(config: AppConfig, logger: Arc<Logger>, shutdown: &Shutdown) -> ServeOutcome {
    // Both receivers exist before the first await so an early signal is seen.
    let mut degraded = shutdown.subscribe();
    let stop = shutdown.subscribe();
    let address = config.server.bind_address();

    let result = match TcpListener::bind(&address).await {
        Ok(listener) => {
            logger.info(
                &format!("API server is running on port {}", config.server.port),
                MODULE,
                None,
                None,
            );
            HttpServer::new(config, Arc::clone(&logger))
                .run(listener, stop)
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ServeOutcome::Stopped,
        Err(e) => {
            log_server_error(&logger, &e);
            let _ = degraded.recv().await;
            ServeOutcome::Degraded(e)
        }
    }
}

/// Log an error raised outside the request pipeline.
pub fn log_server_error(logger: &Logger, error: &dyn fmt::Display) {
    logger.error(
        &format!("Server error: {error}"),
        MODULE,
        None,
        Some(&json!({ "error": error.to_string() })),
    );
}
