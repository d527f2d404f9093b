//! Terminal error stage.
//!
//! Every failure ends here, whether raised by a handler, caught as a panic or
//! forwarded by the success stage. The stage always answers and never
//! forwards further.

use std::any::Any;

use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::envelope::{classify, ErrorBody, HandlerError};
use crate::http::middleware::Exchange;
use crate::http::request::{JSON_UTF8, X_DESCRIPTION, X_ISO_DATE, X_MESSAGE};
use crate::observability::metrics::{self, OUTCOME_ERROR};
use crate::observability::Logger;

const MODULE: &str = "middleware::error_handling";

/// Build the error response for `error`.
pub fn respond(logger: &Logger, exchange: &Exchange, error: &HandlerError) -> Response {
    let ctx = &exchange.ctx;
    let elapsed = ctx.elapsed();
    let mut headers = HeaderMap::new();

    let body = match error {
        HandlerError::Application(app) => {
            let body = classify(
                app.code(),
                app.message(),
                app.description(),
                ctx.request_id(),
                Some(app.details()),
            );
            let introspection = [
                (X_MESSAGE, &body.message),
                (X_DESCRIPTION, &body.description),
                (X_ISO_DATE, &body.timestamp),
            ];
            for (name, value) in introspection {
                match HeaderValue::from_str(value) {
                    Ok(value) => {
                        headers.insert(HeaderName::from_static(name), value);
                    }
                    Err(_) => logger.warn(
                        &format!("Skipping {name} header: value is not a valid header value"),
                        MODULE,
                        Some(ctx.request_id()),
                        None,
                    ),
                }
            }
            body
        }
        HandlerError::Unexpected(text) => ErrorBody::fallback(text.as_str(), ctx.request_id()),
    };

    let status = body.status_code();
    logger.error(
        &format!(
            "Response (Error) = {} | {} - Exec time: {} ms, HTTP Status Code: {}, Message: {}",
            exchange.method,
            exchange.path,
            elapsed.as_millis(),
            status.as_u16(),
            body.message,
        ),
        MODULE,
        Some(ctx.request_id()),
        Some(&json!({
            "errorDescription": body.description,
            "errorDetails": body.details,
            "originalUri": ctx.original_uri(),
        })),
    );
    metrics::record_response(exchange.method.as_str(), status.as_u16(), OUTCOME_ERROR, elapsed);

    let mut response = Json(body).into_response();
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    response.headers_mut().extend(headers);
    response
}

/// Turn a handler panic into an unclassified failure for this stage.
pub fn panic_to_failure(payload: Box<dyn Any + Send + 'static>) -> Response {
    let text = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    HandlerError::Unexpected(text).into_response()
}
