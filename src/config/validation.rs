//! Configuration validation.
//!
//! Serde handles syntax; this module checks meaning. Validation is a pure
//! function `AppConfig -> Result<(), Vec<ValidationError>>` and reports every
//! problem it finds, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::observability::logging::parse_level;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.port must be non-zero")]
    MissingPort,

    #[error("logger.appenders must declare at least one appender")]
    NoAppenders,

    #[error("logger.categories.default is required")]
    MissingDefaultCategory,

    #[error("category `{category}` references undeclared appender `{appender}`")]
    UnknownAppender { category: String, appender: String },

    #[error("category `{category}` has invalid level `{level}`")]
    InvalidLevel { category: String, level: String },

    #[error("metrics.address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a configuration before it is accepted.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(ValidationError::MissingPort);
    }

    let declared = config.logger.appenders.names();
    if declared.is_empty() {
        errors.push(ValidationError::NoAppenders);
    }

    if config.logger.default_category().is_none() {
        errors.push(ValidationError::MissingDefaultCategory);
    }

    for (name, category) in &config.logger.categories {
        for appender in &category.appenders {
            if !declared.contains(&appender.as_str()) {
                errors.push(ValidationError::UnknownAppender {
                    category: name.clone(),
                    appender: appender.clone(),
                });
            }
        }
        if parse_level(&category.level).is_none() {
            errors.push(ValidationError::InvalidLevel {
                category: name.clone(),
                level: category.level.clone(),
            });
        }
    }

    if config.metrics.enabled && config.metrics.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.metrics.address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
