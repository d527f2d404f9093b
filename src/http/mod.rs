//! HTTP request lifecycle.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, pipeline wiring)
//!     → request.rs / context.rs (correlation headers, request id, timing)
//!     → middleware/ (header, logging, normalization stages)
//!     → routes (handlers return envelopes)
//!     → wire response
//! ```

pub mod context;
pub mod middleware;
pub mod request;
pub mod server;

pub use context::{CorrelationContext, CorrelationExt};
pub use request::{RequestIdGenerator, UuidGenerator, X_API_VERSION, X_ORIGINAL_URI, X_REQUEST_ID};
pub use server::{app, with_pipeline, AppState, HttpServer};
