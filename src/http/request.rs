//! Inbound correlation headers and request id generation.
//!
//! # Design Decisions
//! - Request ids come from a [`RequestIdGenerator`] held in application state,
//!   so tests can swap in deterministic ids
//! - Production ids are UUID v4

use uuid::Uuid;

/// Caller-supplied correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";
/// URI as seen by an upstream gateway, before rewriting.
pub const X_ORIGINAL_URI: &str = "x-original-uri";
/// Response-shape switch (`legacy` or anything else).
pub const X_API_VERSION: &str = "x-api-version";

/// Introspection headers set on classified error responses.
pub const X_MESSAGE: &str = "x-message";
pub const X_DESCRIPTION: &str = "x-description";
pub const X_ISO_DATE: &str = "x-iso-date";

/// Content type of every normalized response.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Api version used when the caller does not send `x-api-version`.
pub const DEFAULT_API_VERSION: &str = "default";

/// Source of fresh request ids.
pub trait RequestIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl RequestIdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_generator_unique_and_valid() {
        let ids = UuidGenerator;
        let a = ids.generate();
        let b = ids.generate();
        assert_ne!(a, b);
        assert_eq!(Uuid::parse_str(&a).unwrap().get_version_num(), 4);
    }
}
