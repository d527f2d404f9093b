//! Hand-off between handlers and the normalization stages.
//!
//! A handler returns [`HandlerResult`]. Either variant becomes a placeholder
//! response with the [`Outcome`] stored in its extensions; the normalization
//! dispatcher takes it back out and builds the real response. If nothing
//! normalizes it, the placeholder is a bare 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::envelope::{AppError, HandlerError, SuccessEnvelope};

/// What a handler produced.
pub type HandlerResult = Result<SuccessEnvelope, HandlerError>;

/// Tagged outcome carried from a handler to the terminal stage.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success(SuccessEnvelope),
    Failure(HandlerError),
}

impl Outcome {
    fn into_pending_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }

    /// Take the outcome out of a response, if one was attached.
    pub fn take(response: &mut Response) -> Option<Outcome> {
        response.extensions_mut().remove::<Outcome>()
    }
}

impl From<HandlerResult> for Outcome {
    fn from(result: HandlerResult) -> Self {
        match result {
            Ok(envelope) => Self::Success(envelope),
            Err(error) => Self::Failure(error),
        }
    }
}

impl IntoResponse for SuccessEnvelope {
    fn into_response(self) -> Response {
        Outcome::Success(self).into_pending_response()
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        Outcome::Failure(self).into_pending_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        HandlerError::from(self).into_response()
    }
}
