//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the API service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings.
    pub server: ServerConfig,

    /// Logger settings (application name, appenders, categories).
    pub logger: LoggerConfig,

    /// Metrics exporter settings.
    pub metrics: MetricsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Must be non-zero.
    pub port: u16,

    /// Deployment environment label ("development", "production", ...).
    pub env: String,
}

impl ServerConfig {
    /// `host:port` as passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            env: "development".to_string(),
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Value of the `app=` field on every log line.
    pub application_name: String,

    /// Declared log destinations.
    pub appenders: AppendersConfig,

    /// Log categories keyed by name. Only `default` is consulted.
    pub categories: BTreeMap<String, CategoryConfig>,
}

impl LoggerConfig {
    /// The `default` category, if declared.
    pub fn default_category(&self) -> Option<&CategoryConfig> {
        self.categories.get("default")
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            "default".to_string(),
            CategoryConfig {
                appenders: vec!["console".to_string()],
                level: "info".to_string(),
            },
        );
        Self {
            application_name: "api-services".to_string(),
            appenders: AppendersConfig {
                file: None,
                console: Some(ConsoleAppenderConfig::default()),
            },
            categories,
        }
    }
}

/// The set of appenders a category may reference.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppendersConfig {
    /// Rolling file output.
    pub file: Option<FileAppenderConfig>,

    /// Standard output.
    pub console: Option<ConsoleAppenderConfig>,
}

impl AppendersConfig {
    /// Names of the appenders that are declared.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.console.is_some() {
            names.push("console");
        }
        if self.file.is_some() {
            names.push("file");
        }
        names
    }
}

/// File appender configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileAppenderConfig {
    /// Path of the active log file.
    pub file_name: String,

    /// Rotation threshold in bytes. Rotation is daily; this is kept for parity
    /// with existing config files and reported at startup.
    #[serde(default)]
    pub max_log_size: u64,

    /// Number of rotated files kept on disk.
    #[serde(default = "default_backups")]
    pub backups: usize,
}

fn default_backups() -> usize {
    3
}

/// Console appender configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleAppenderConfig {
    /// Emit ANSI colours.
    pub ansi: bool,
}

impl Default for ConsoleAppenderConfig {
    fn default() -> Self {
        Self { ansi: true }
    }
}

/// A log category: which appenders receive events and at what level.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryConfig {
    /// Appender names ("console", "file").
    pub appenders: Vec<String>,

    /// Minimum level (trace, debug, info, warn, error, fatal).
    pub level: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Serve a Prometheus scrape endpoint.
    pub enabled: bool,

    /// Scrape endpoint bind address.
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "0.0.0.0:9090".to_string(),
        }
    }
}
