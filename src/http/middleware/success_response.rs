//! Terminal success stage.
//!
//! Converts a [`SuccessEnvelope`] into the wire response: status from the
//! success table, JSON content type, extra headers or cookies, and a body
//! shaped by the caller's api version. Any failure while building the
//! response is logged and handed to the error stage.

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, SET_COOKIE},
        HeaderMap, HeaderName, HeaderValue,
    },
    response::Response,
};
use serde_json::json;

use crate::envelope::{HandlerError, HeaderTarget, ResponseHeader, SuccessEnvelope};
use crate::http::middleware::{error_handling, Exchange};
use crate::http::request::JSON_UTF8;
use crate::observability::metrics::{self, OUTCOME_SUCCESS};
use crate::observability::Logger;

const MODULE: &str = "middleware::success_response";

/// Build the response for `envelope`, falling back to the error stage.
pub fn respond(logger: &Logger, exchange: &Exchange, envelope: SuccessEnvelope) -> Response {
    match build(logger, exchange, &envelope) {
        Ok(response) => response,
        Err(error) => {
            logger.error(
                "Error generating success response.",
                MODULE,
                Some(exchange.ctx.request_id()),
                Some(&json!({ "error": error.to_string() })),
            );
            error_handling::respond(logger, exchange, &error)
        }
    }
}

fn build(
    logger: &Logger,
    exchange: &Exchange,
    envelope: &SuccessEnvelope,
) -> Result<Response, HandlerError> {
    let ctx = &exchange.ctx;
    let status = envelope.status();

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    if let Some(header) = envelope.header() {
        let target = header.target();
        for (key, value) in header.entries() {
            write_entry(&mut headers, target, key, &value)?;
        }
    }

    let elapsed = ctx.elapsed();
    let summary = format!(
        "Response (Success) - {} | {} - Exec time: {} ms, HTTP Status Code: {}, Message: {}",
        exchange.method,
        exchange.path,
        elapsed.as_millis(),
        status.as_u16(),
        envelope.message(),
    );
    logger.debug(
        &summary,
        MODULE,
        Some(ctx.request_id()),
        Some(&json!({
            "successData": envelope.data(),
            "successHeader": envelope.header().map(ResponseHeader::to_log_value),
            "originalUri": ctx.original_uri(),
        })),
    );
    logger.info(
        &summary,
        MODULE,
        Some(ctx.request_id()),
        Some(&json!({ "originalUri": ctx.original_uri() })),
    );

    let body = match envelope.to_wire(ctx.api_version())? {
        Some(bytes) => Body::from(bytes),
        None => Body::empty(),
    };
    metrics::record_response(exchange.method.as_str(), status.as_u16(), OUTCOME_SUCCESS, elapsed);

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

fn write_entry(
    headers: &mut HeaderMap,
    target: HeaderTarget,
    key: &str,
    value: &str,
) -> Result<(), HandlerError> {
    match target {
        HeaderTarget::Header => {
            let name = HeaderName::try_from(key).map_err(|e| {
                HandlerError::unexpected(format!("invalid header name `{key}`: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                HandlerError::unexpected(format!("invalid value for header `{key}`: {e}"))
            })?;
            headers.insert(name, value);
        }
        HeaderTarget::Cookie => {
            if key.is_empty() || key.contains(|c: char| "=;, \t".contains(c)) {
                return Err(HandlerError::unexpected(format!("invalid cookie name `{key}`")));
            }
            let cookie = HeaderValue::from_str(&format!("{key}={value}; Path=/")).map_err(|e| {
                HandlerError::unexpected(format!("invalid value for cookie `{key}`: {e}"))
            })?;
            headers.append(SET_COOKIE, cookie);
        }
    }
    Ok(())
}
