//! Logging configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Accepted values for [`LoggingConfig::format`].
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Rejects output formats the subscriber cannot produce.
    pub fn validate(&self) -> Result<(), AppError> {
        if !LOG_FORMATS.contains(&self.format.as_str()) {
            return Err(AppError::configuration(format!(
                "logging.format must be one of {LOG_FORMATS:?}, got '{}'",
                self.format
            )));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}
