//! Log sink initialisation.
//!
//! Builds the global `tracing` subscriber from [`LoggerConfig`]: a console
//! layer and/or a rolling file layer, selected by the appenders listed in the
//! `default` category. `RUST_LOG` overrides the configured level.

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggerConfig;

/// Errors raised while installing the log sink.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open file appender: {0}")]
    Appender(#[from] InitError),

    #[error("a global subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Keeps the non-blocking file writer alive. Drop it last.
#[must_use = "dropping the guard stops the file appender"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Map a configured level name onto a tracing filter.
///
/// `fatal` has no tracing counterpart and maps to `error`.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_ascii_lowercase().as_str() {
        "all" | "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" | "fatal" => Some(LevelFilter::ERROR),
        "off" => Some(LevelFilter::OFF),
        _ => None,
    }
}

/// Install the global subscriber described by `config`.
pub fn init(config: &LoggerConfig) -> Result<LoggingGuard, LoggingError> {
    let category = config.default_category();
    let level = category
        .and_then(|c| parse_level(&c.level))
        .unwrap_or(LevelFilter::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let wants = |name: &str| match category {
        Some(c) => c.appenders.iter().any(|a| a == name),
        None => name == "console",
    };

    let console = match &config.appenders.console {
        Some(console) if wants("console") => Some(fmt::layer().with_ansi(console.ansi)),
        _ => None,
    };

    let (file, guard) = match &config.appenders.file {
        Some(file) if wants("file") => {
            let path = Path::new(&file.file_name);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let prefix = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| config.application_name.clone());

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .max_log_files(file.backups.max(1))
                .build(dir)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;

    if let Some(file) = &config.appenders.file {
        tracing::debug!(
            file = %file.file_name,
            backups = file.backups,
            max_log_size = file.max_log_size,
            "File appender rotates daily"
        );
    }

    Ok(LoggingGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("INFO"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("fatal"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("all"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("off"), Some(LevelFilter::OFF));
        assert_eq!(parse_level("verbose"), None);
    }
}
