//! Typed handler outcomes.
//!
//! # Data Flow
//! ```text
//! handler
//!     → Ok(SuccessEnvelope)  → success.rs (status table, wire shape)
//!     → Err(HandlerError)    → error.rs (status table, classification)
//!     → outcome.rs (attach to response for the terminal stages)
//! ```
//!
//! Envelopes are immutable once built and know nothing about requests; the
//! request-dependent parts (api version, request id, timing) are applied by
//! the stages in `http::middleware`.

pub mod error;
pub mod outcome;
pub mod success;

use thiserror::Error;

pub use error::{
    classify, is_error_code, AppError, Details, ErrorBody, ErrorCode, HandlerError,
    GENERIC_ERROR_MESSAGE,
};
pub use outcome::{HandlerResult, Outcome};
pub use success::{HeaderTarget, ResponseHeader, SuccessCode, SuccessEnvelope, LEGACY_API_VERSION};

/// A code string outside a status table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized code `{0}`")]
pub struct UnknownCode(pub String);
