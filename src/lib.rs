//! API service skeleton with a uniform request/response envelope.
//!
//! Every request gets a correlation id, is timed and logged, and is answered
//! through one of two terminal stages: handlers return a [`SuccessEnvelope`]
//! or raise a [`HandlerError`], never a raw response.

pub mod config;
pub mod envelope;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;

pub use config::AppConfig;
pub use envelope::{AppError, ErrorCode, HandlerError, HandlerResult, SuccessCode, SuccessEnvelope};
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use observability::Logger;
