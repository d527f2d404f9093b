//! Per-request correlation context.
//!
//! Resolved once by the request-header stage and stored in the request
//! extensions. Later stages and handlers only read it.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request};
use chrono::{DateTime, Utc};

use crate::envelope::{HandlerError, LEGACY_API_VERSION};
use crate::http::request::{
    RequestIdGenerator, DEFAULT_API_VERSION, X_API_VERSION, X_ORIGINAL_URI, X_REQUEST_ID,
};

/// Identifiers and timing of one in-flight request.
#[derive(Debug, Clone)]
pub struct CorrelationContext {
    request_id: String,
    original_uri: String,
    api_version: String,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl CorrelationContext {
    /// Resolve from inbound headers, falling back to a fresh id, an empty
    /// original URI and the `default` api version.
    ///
    /// A supplied header is never discarded: non-ASCII bytes are decoded
    /// lossily as UTF-8.
    pub fn resolve(headers: &HeaderMap, ids: &dyn RequestIdGenerator) -> Self {
        let header = |name: &str| {
            headers.get(name).map(|v| match v.to_str() {
                Ok(s) => s.to_owned(),
                Err(_) => String::from_utf8_lossy(v.as_bytes()).into_owned(),
            })
        };

        Self {
            request_id: header(X_REQUEST_ID).unwrap_or_else(|| ids.generate()),
            original_uri: header(X_ORIGINAL_URI).unwrap_or_default(),
            api_version: header(X_API_VERSION).unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Attach a context to `req` unless one is already there.
    ///
    /// Returns `true` when a new context was stored.
    pub fn attach(req: &mut Request<Body>, ids: &dyn RequestIdGenerator) -> bool {
        if req.extensions().get::<CorrelationContext>().is_some() {
            return false;
        }
        let ctx = Self::resolve(req.headers(), ids);
        req.extensions_mut().insert(ctx);
        true
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn original_uri(&self) -> &str {
        &self.original_uri
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn is_legacy(&self) -> bool {
        self.api_version == LEGACY_API_VERSION
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Access to the correlation context of a request.
pub trait CorrelationExt {
    fn correlation(&self) -> Option<&CorrelationContext>;
}

impl<B> CorrelationExt for Request<B> {
    fn correlation(&self) -> Option<&CorrelationContext> {
        self.extensions().get::<CorrelationContext>()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CorrelationContext {
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CorrelationContext>()
            .cloned()
            .ok_or_else(|| HandlerError::unexpected("correlation context missing"))
    }
}
