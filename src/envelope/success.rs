//! Success envelopes and the success status table.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::{HandlerError, UnknownCode};

/// `x-api-version` value that selects the bare-data response shape.
pub const LEGACY_API_VERSION: &str = "legacy";

/// Symbolic success outcomes.
///
/// | Code | Status |
/// |---|---|
/// | `OK` | 200 |
/// | `CREATED` | 201 |
/// | `DELETED` | 204 |
/// | `NO_CONTENT` | 204 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuccessCode {
    Ok,
    Created,
    Deleted,
    NoContent,
}

impl SuccessCode {
    pub const ALL: [SuccessCode; 4] = [Self::Ok, Self::Created, Self::Deleted, Self::NoContent];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Created => "CREATED",
            Self::Deleted => "DELETED",
            Self::NoContent => "NO_CONTENT",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::Created => StatusCode::CREATED,
            Self::Deleted | Self::NoContent => StatusCode::NO_CONTENT,
        }
    }

    /// Parse a code string; unrecognized codes resolve to `OK` (status 200).
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::Ok)
    }
}

impl FromStr for SuccessCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

impl fmt::Display for SuccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the extra entries of a [`ResponseHeader`] are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderTarget {
    /// Plain response headers.
    #[default]
    Header,
    /// `Set-Cookie` entries.
    Cookie,
}

/// Extra key/value data a handler wants on the response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseHeader {
    target: HeaderTarget,
    extra: BTreeMap<String, Value>,
}

impl ResponseHeader {
    /// Entries are written as response headers.
    pub fn headers() -> Self {
        Self::default()
    }

    /// Entries are written as cookies.
    pub fn cookies() -> Self {
        Self {
            target: HeaderTarget::Cookie,
            extra: BTreeMap::new(),
        }
    }

    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn target(&self) -> HeaderTarget {
        self.target
    }

    pub fn emit_as_cookie(&self) -> bool {
        self.target == HeaderTarget::Cookie
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Header/cookie values are written as text; JSON strings lose their quotes.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> {
        self.extra.iter().map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.as_str(), text)
        })
    }

    /// Shape used in debug logs.
    pub fn to_log_value(&self) -> Value {
        serde_json::json!({
            "emitAsCookie": self.emit_as_cookie(),
            "extra": self.extra,
        })
    }
}

/// Successful handler outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessEnvelope {
    code: SuccessCode,
    message: String,
    data: Value,
    header: Option<ResponseHeader>,
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    success: bool,
    message: &'a str,
    data: &'a Value,
}

impl SuccessEnvelope {
    pub fn new(code: SuccessCode, message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data: data.into(),
            header: None,
        }
    }

    /// Build an envelope from any serializable payload.
    pub fn from_serialize<T: Serialize>(
        code: SuccessCode,
        message: impl Into<String>,
        data: &T,
    ) -> Result<Self, HandlerError> {
        Ok(Self::new(code, message, serde_json::to_value(data)?))
    }

    pub fn ok(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self::new(SuccessCode::Ok, message, data)
    }

    pub fn created(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self::new(SuccessCode::Created, message, data)
    }

    pub fn deleted(message: impl Into<String>) -> Self {
        Self::new(SuccessCode::Deleted, message, Value::Null)
    }

    pub fn no_content(message: impl Into<String>) -> Self {
        Self::new(SuccessCode::NoContent, message, Value::Null)
    }

    pub fn with_header(mut self, header: ResponseHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn code(&self) -> SuccessCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn header(&self) -> Option<&ResponseHeader> {
        self.header.as_ref()
    }

    /// Serialize the wire body for the given api version.
    ///
    /// `None` for 204 responses. `legacy` yields the bare data value; every
    /// other version yields `{"success":true,"message":...,"data":...}`.
    pub fn to_wire(&self, api_version: &str) -> Result<Option<Vec<u8>>, serde_json::Error> {
        if self.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = if api_version == LEGACY_API_VERSION {
            serde_json::to_vec(&self.data)?
        } else {
            serde_json::to_vec(&SuccessBody {
                success: true,
                message: &self.message,
                data: &self.data,
            })?
        };
        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_table() {
        assert_eq!(SuccessCode::Ok.status(), StatusCode::OK);
        assert_eq!(SuccessCode::Created.status(), StatusCode::CREATED);
        assert_eq!(SuccessCode::Deleted.status(), StatusCode::NO_CONTENT);
        assert_eq!(SuccessCode::NoContent.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_unknown_code_defaults_to_ok() {
        assert_eq!(SuccessCode::from_code("CREATED"), SuccessCode::Created);
        assert_eq!(SuccessCode::from_code("ACCEPTED"), SuccessCode::Ok);
        assert_eq!(SuccessCode::from_code("ACCEPTED").status(), StatusCode::OK);
        assert!("ok".parse::<SuccessCode>().is_err());
    }

    #[test]
    fn test_legacy_body_is_bare_data() {
        let envelope = SuccessEnvelope::ok("done", json!({"id": 1}));
        let body = envelope.to_wire("legacy").unwrap().unwrap();
        assert_eq!(body, br#"{"id":1}"#);
    }

    #[test]
    fn test_default_body_is_wrapped_in_order() {
        let envelope = SuccessEnvelope::ok("M", json!({"id": 1}));
        let body = envelope.to_wire("default").unwrap().unwrap();
        assert_eq!(body, br#"{"success":true,"message":"M","data":{"id":1}}"#);
    }

    #[test]
    fn test_no_content_codes_suppress_body() {
        for envelope in [
            SuccessEnvelope::deleted("gone"),
            SuccessEnvelope::no_content("nothing"),
            SuccessEnvelope::new(SuccessCode::Deleted, "gone", json!({"id": 1})),
        ] {
            assert_eq!(envelope.to_wire("default").unwrap(), None);
            assert_eq!(envelope.to_wire("legacy").unwrap(), None);
        }
    }

    #[test]
    fn test_response_header_entries() {
        let header = ResponseHeader::cookies()
            .insert("session", "abc")
            .insert("ttl", 30);
        assert!(header.emit_as_cookie());
        let entries: Vec<_> = header.entries().collect();
        assert_eq!(
            entries,
            vec![("session", "abc".to_string()), ("ttl", "30".to_string())]
        );
        assert_eq!(
            header.to_log_value(),
            json!({"emitAsCookie": true, "extra": {"session": "abc", "ttl": 30}})
        );
        assert_eq!(ResponseHeader::headers().target(), HeaderTarget::Header);
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct User {
            id: u32,
        }
        let envelope =
            SuccessEnvelope::from_serialize(SuccessCode::Created, "made", &User { id: 7 }).unwrap();
        assert_eq!(envelope.data(), &json!({"id": 7}));
        assert_eq!(envelope.status(), StatusCode::CREATED);
    }
}
