//! Request pipeline stages.
//!
//! # Data Flow
//! ```text
//! request_header   (resolve CorrelationContext)
//!     → request_logging  (log method and path)
//!     → normalize        (run handler, then dispatch on its Outcome)
//!         → success_response  (Outcome::Success)
//!         → error_handling    (Outcome::Failure, or a failed success response)
//!         → passthrough       (no Outcome: health probe, plain responses)
//! ```

pub mod error_handling;
pub mod request_header;
pub mod request_logging;
pub mod success_response;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};

use crate::envelope::Outcome;
use crate::http::context::{CorrelationContext, CorrelationExt};
use crate::http::server::AppState;

pub use error_handling::panic_to_failure;
pub use request_header::request_header_middleware;
pub use request_logging::request_logging_middleware;

/// What the terminal stages need to know about the request they answer.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub method: Method,
    pub path: String,
    pub ctx: CorrelationContext,
}

impl Exchange {
    #[cfg(test)]
    pub(crate) fn for_test(method: &str, path: &str, request_id: &str) -> Self {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(crate::http::request::X_REQUEST_ID, request_id)
            .body(Body::empty())
            .unwrap();
        Self {
            method: req.method().clone(),
            path: req.uri().path().to_owned(),
            ctx: CorrelationContext::resolve(req.headers(), &crate::http::request::UuidGenerator),
        }
    }
}

/// Run the handler and route its [`Outcome`] to the matching terminal stage.
pub async fn normalize_response_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = req
        .correlation()
        .cloned()
        .unwrap_or_else(|| CorrelationContext::resolve(req.headers(), state.ids.as_ref()));
    let exchange = Exchange {
        method: req.method().clone(),
        path: req.uri().path().to_owned(),
        ctx,
    };

    let mut response = next.run(req).await;
    match Outcome::take(&mut response) {
        Some(Outcome::Success(envelope)) => {
            success_response::respond(&state.logger, &exchange, envelope)
        }
        Some(Outcome::Failure(error)) => error_handling::respond(&state.logger, &exchange, &error),
        None => response,
    }
}
