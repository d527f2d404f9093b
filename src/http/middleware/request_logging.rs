//! Logs every inbound request. Must run after the request-header stage.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::context::{CorrelationContext, CorrelationExt};
use crate::http::server::AppState;

const MODULE: &str = "middleware::request_logging";

pub async fn request_logging_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    state.logger.info(
        &format!("Request - {} | {}", req.method(), req.uri().path()),
        MODULE,
        req.correlation().map(CorrelationContext::request_id),
        None,
    );

    next.run(req).await
}
