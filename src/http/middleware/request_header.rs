//! First pipeline stage: resolve the correlation context.
//!
//! Never rejects a request.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::SecondsFormat;

use crate::http::context::{CorrelationContext, CorrelationExt};
use crate::http::server::AppState;

const MODULE: &str = "middleware::request_header";

pub async fn request_header_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    state.logger.info(
        "Setting request headers!",
        MODULE,
        req.correlation().map(CorrelationContext::request_id),
        None,
    );

    if CorrelationContext::attach(&mut req, state.ids.as_ref()) {
        if let Some(ctx) = req.correlation() {
            state.logger.info(
                &format!(
                    "RequestId: {} | OriginalURI: {} | StartTime: {} | Api Version: {}",
                    ctx.request_id(),
                    ctx.original_uri(),
                    ctx.started_at().to_rfc3339_opts(SecondsFormat::Millis, true),
                    ctx.api_version(),
                ),
                MODULE,
                Some(ctx.request_id()),
                None,
            );
        }
    }

    next.run(req).await
}
