//! Route table.

pub mod health;
pub mod user;

use axum::{
    http::{Method, Uri},
    routing::get,
    Router,
};

use crate::envelope::AppError;
use crate::http::server::AppState;

/// Every route the service exposes, before pipeline layers are applied.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/test", get(health::running))
        .merge(user::router())
        .fallback(route_not_found)
}

/// Unmatched paths answer with the standard `NOT_FOUND` envelope.
async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::not_found(
        "Route not found",
        format!("No route matches {method} {}", uri.path()),
    )
}
