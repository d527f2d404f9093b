//! HTTP server setup.
//!
//! # Responsibilities
//! - Hold the shared, read-only application state
//! - Wire the pipeline stages around the route table
//! - Serve on a listener until the shutdown signal fires

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::middleware::{
    normalize_response_middleware, panic_to_failure, request_header_middleware,
    request_logging_middleware,
};
use crate::http::request::{RequestIdGenerator, UuidGenerator};
use crate::observability::Logger;
use crate::routes;

/// Application state injected into stages and handlers.
///
/// Built once at startup; nothing in it is mutated while serving.
#[derive(Clone)]
pub struct AppState {
    pub logger: Arc<Logger>,
    pub ids: Arc<dyn RequestIdGenerator>,
}

impl AppState {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self::with_id_generator(logger, Arc::new(UuidGenerator))
    }

    pub fn with_id_generator(logger: Arc<Logger>, ids: Arc<dyn RequestIdGenerator>) -> Self {
        Self { logger, ids }
    }
}

/// Wrap `routes` in the request pipeline.
///
/// Outermost first: trace span, request header, request logging,
/// normalization, panic capture, then the routes themselves.
pub fn with_pipeline(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(CatchPanicLayer::custom(panic_to_failure))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            normalize_response_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_logging_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_header_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The full application: every route behind the pipeline.
pub fn app(state: AppState) -> Router {
    with_pipeline(routes::routes(), state)
}

/// HTTP server for the API service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and logger.
    pub fn new(config: AppConfig, logger: Arc<Logger>) -> Self {
        let router = app(AppState::new(logger));
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are drained before returning.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            env = %self.config.server.env,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
