//! Liveness probes.
//!
//! These answer directly and bypass envelope normalization.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub success: bool,
    pub message: &'static str,
}

/// `GET /api/health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        success: true,
        message: "OK",
    })
}

/// `GET /test`
pub async fn running() -> &'static str {
    "Server is running"
}
