//! Error envelopes, the error status table and classification.

use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::envelope::UnknownCode;

/// Structured error details carried to the client.
pub type Details = Map<String, Value>;

/// Top-level message used for every unclassified error.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Symbolic error outcomes and their fixed HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    AuthorizationFailed,
    Forbidden,
    NotFound,
    DuplicateEntry,
    TooManyRequests,
    DbConnectionError,
    InternalServerError,
    UnknownError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 9] = [
        Self::InvalidInput,
        Self::AuthorizationFailed,
        Self::Forbidden,
        Self::NotFound,
        Self::DuplicateEntry,
        Self::TooManyRequests,
        Self::DbConnectionError,
        Self::InternalServerError,
        Self::UnknownError,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::AuthorizationFailed => "AUTHORIZATION_FAILED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateEntry => "DUPLICATE_ENTRY",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::DbConnectionError => "DB_CONNECTION_ERROR",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::AuthorizationFailed => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DuplicateEntry => StatusCode::CONFLICT,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::DbConnectionError | Self::InternalServerError | Self::UnknownError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl FromStr for ErrorCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `code` is one of the known [`ErrorCode`]s.
///
/// Unknown codes are simply unrecognized; they are not an error.
pub fn is_error_code(code: &str) -> bool {
    code.parse::<ErrorCode>().is_ok()
}

/// Status for a code string; anything outside the table is 500.
pub fn status_for(code: &str) -> StatusCode {
    code.parse::<ErrorCode>()
        .map_or(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::status)
}

/// A classified application error raised by a handler.
///
/// The code is kept as text so codes outside the table still reach the client
/// verbatim (with status 500).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AppError {
    code: String,
    message: String,
    description: String,
    details: Details,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_raw_code(code.as_str(), message, description)
    }

    pub fn with_raw_code(
        code: impl Into<String>,
        message: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            description: description.into(),
            details: Details::new(),
        }
    }

    pub fn invalid_input(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message, description)
    }

    pub fn not_found(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message, description)
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn status(&self) -> StatusCode {
        status_for(&self.code)
    }
}

/// Failure channel of a handler.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    /// Classified error with a code, message and description.
    #[error(transparent)]
    Application(#[from] AppError),

    /// Anything else. The text is only ever exposed as `description`.
    #[error("{0}")]
    Unexpected(String),
}

impl HandlerError {
    pub fn unexpected(error: impl fmt::Display) -> Self {
        Self::Unexpected(error.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        Self::unexpected(error)
    }
}

/// Wire body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub status: u16,
    pub code: String,
    pub message: String,
    pub description: String,
    pub details: Details,
    pub request_id: String,
    pub timestamp: String,
}

impl ErrorBody {
    /// Body for an unclassified error: 500, generic message, original text as description.
    pub fn fallback(description: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            success: false,
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            code: ErrorCode::InternalServerError.as_str().to_string(),
            message: GENERIC_ERROR_MESSAGE.to_string(),
            description: description.into(),
            details: Details::new(),
            request_id: request_id.into(),
            timestamp: iso_timestamp(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Build the error body for a code. Total over all strings; unknown codes get 500.
pub fn classify(
    code: &str,
    message: &str,
    description: &str,
    request_id: &str,
    details: Option<&Details>,
) -> ErrorBody {
    ErrorBody {
        success: false,
        status: status_for(code).as_u16(),
        code: code.to_string(),
        message: message.to_string(),
        description: description.to_string(),
        details: details.cloned().unwrap_or_default(),
        request_id: request_id.to_string(),
        timestamp: iso_timestamp(),
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn test_status_table() {
        let expected = [
            ("INVALID_INPUT", 400),
            ("AUTHORIZATION_FAILED", 401),
            ("FORBIDDEN", 403),
            ("NOT_FOUND", 404),
            ("DUPLICATE_ENTRY", 409),
            ("TOO_MANY_REQUESTS", 429),
            ("DB_CONNECTION_ERROR", 500),
            ("INTERNAL_SERVER_ERROR", 500),
            ("UNKNOWN_ERROR", 500),
        ];
        for (code, status) in expected {
            assert!(is_error_code(code), "{code} should be recognized");
            assert_eq!(classify(code, "m", "d", "r", None).status, status, "{code}");
        }
        assert_eq!(expected.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_unknown_codes() {
        for code in ["TEAPOT", "", "not_found", "NOT_FOUND "] {
            assert!(!is_error_code(code));
            let body = classify(code, "m", "d", "r", None);
            assert_eq!(body.status, 500);
            assert_eq!(body.code, code);
        }
    }

    #[test]
    fn test_classify_body() {
        let mut details = Details::new();
        details.insert("field".into(), json!("email"));
        let body = classify("INVALID_INPUT", "bad", "email missing", "req-1", Some(&details));

        assert!(!body.success);
        assert_eq!(body.message, "bad");
        assert_eq!(body.description, "email missing");
        assert_eq!(body.request_id, "req-1");
        assert_eq!(body.details.get("field"), Some(&json!("email")));
        assert!(DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
        assert!(body.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_error_body_wire_shape() {
        let body = ErrorBody::fallback("boom", "req-9");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["status"], json!(500));
        assert_eq!(value["code"], json!("INTERNAL_SERVER_ERROR"));
        assert_eq!(value["message"], json!(GENERIC_ERROR_MESSAGE));
        assert_eq!(value["description"], json!("boom"));
        assert_eq!(value["details"], json!({}));
        assert_eq!(value["requestId"], json!("req-9"));
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn test_app_error_accessors() {
        let error = AppError::not_found("missing", "no such user");
        assert_eq!(error.code(), "NOT_FOUND");
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "missing");

        let raw = AppError::with_raw_code("GONE_FISHING", "m", "d");
        assert_eq!(raw.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_handler_error_display() {
        let error: HandlerError = AppError::invalid_input("bad", "worse").into();
        assert_eq!(error.to_string(), "bad");
        assert_eq!(HandlerError::unexpected("boom").to_string(), "boom");
    }
}
