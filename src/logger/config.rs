//! Logger configuration structures.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

fn default_log_level() -> String {
    "info".to_string()
}

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Pretty,
    /// Structured JSON output for log aggregation
    Json,
}

/// Logger configuration loaded from the `[logger]` settings section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Log level filter directive (e.g. "info", "mercado_rs=debug,info")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggerConfig {
    /// Validates the level against the set of directives accepted by
    /// tracing-subscriber's EnvFilter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level.is_empty() {
            return Err(ConfigError::validation("logger.level", "must not be empty"));
        }
        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
