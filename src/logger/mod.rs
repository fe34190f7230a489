//! Logging setup built on tracing and tracing-subscriber.
//!
//! The subscriber is configured from [`LoggerConfig`], which is loaded as
//! part of the application settings. Output format can be switched between
//! human-readable and JSON for log aggregation.

mod config;

pub use config::{LogFormat, LoggerConfig};

use tracing_subscriber::EnvFilter;

use crate::config::error::ConfigError;

/// Initializes the global tracing subscriber from the logger configuration.
///
/// The `RUST_LOG` environment variable, when set, overrides the configured
/// level filter.
///
/// # Errors
/// Returns a `ConfigError` if the configured level is not a valid filter
/// directive or a subscriber is already installed.
pub fn init_logger(config: &LoggerConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigError::validation("logger.level".to_string(), e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| ConfigError::ParseError(format!("Failed to install subscriber: {}", e)))
}
