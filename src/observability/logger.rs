//! Correlation-aware application logger.
//!
//! Every line is a flat `key=value` list:
//!
//! ```text
//! msg=Request - GET | /api/user, module=middleware::request_logging, app=api-services, reqId=7f1c..., customData={}
//! ```
//!
//! The logger holds no per-request state. It is built once from the validated
//! [`LoggerConfig`] and shared behind an `Arc` by every pipeline stage.

use serde_json::Value;

use crate::config::LoggerConfig;

/// Target used for every event emitted by [`Logger`].
pub const LOG_TARGET: &str = "api_services::app";

/// Formats and emits structured log lines.
#[derive(Debug, Clone)]
pub struct Logger {
    application_name: String,
}

impl Logger {
    /// Create a logger from the validated logger configuration.
    pub fn new(config: &LoggerConfig) -> Self {
        Self::with_application_name(config.application_name.clone())
    }

    pub fn with_application_name(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
        }
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Build one log line. `reqId` is omitted when no request id is known;
    /// missing custom data serializes as `{}`.
    pub fn format_line(
        &self,
        message: &str,
        module: &str,
        request_id: Option<&str>,
        custom_data: Option<&Value>,
    ) -> String {
        let custom_data = custom_data.map_or_else(|| "{}".to_string(), Value::to_string);

        let mut fields = vec![
            ("msg", message),
            ("module", module),
            ("app", self.application_name.as_str()),
        ];
        if let Some(id) = request_id {
            fields.push(("reqId", id));
        }
        fields.push(("customData", custom_data.as_str()));

        fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn trace(&self, message: &str, module: &str, request_id: Option<&str>, data: Option<&Value>) {
        let line = self.format_line(message, module, request_id, data);
        tracing::trace!(target: LOG_TARGET, "{line}");
    }

    pub fn debug(&self, message: &str, module: &str, request_id: Option<&str>, data: Option<&Value>) {
        let line = self.format_line(message, module, request_id, data);
        tracing::debug!(target: LOG_TARGET, "{line}");
    }

    pub fn info(&self, message: &str, module: &str, request_id: Option<&str>, data: Option<&Value>) {
        let line = self.format_line(message, module, request_id, data);
        tracing::info!(target: LOG_TARGET, "{line}");
    }

    pub fn warn(&self, message: &str, module: &str, request_id: Option<&str>, data: Option<&Value>) {
        let line = self.format_line(message, module, request_id, data);
        tracing::warn!(target: LOG_TARGET, "{line}");
    }

    pub fn error(&self, message: &str, module: &str, request_id: Option<&str>, data: Option<&Value>) {
        let line = self.format_line(message, module, request_id, data);
        tracing::error!(target: LOG_TARGET, "{line}");
    }

    /// tracing has no FATAL level; fatal lines are errors flagged `fatal=true`.
    pub fn fatal(&self, message: &str, module: &str, request_id: Option<&str>, data: Option<&Value>) {
        let line = self.format_line(message, module, request_id, data);
        tracing::error!(target: LOG_TARGET, fatal = true, "{line}");
    }
}
