//! Declarative logger configuration
//!
//! `LoggerConfig` can be deserialized from JSON (or any serde format) and
//! turned into a [`LoggerBuilder`](super::LoggerBuilder) with
//! `LoggerBuilder::from_config`.

use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use crate::formatters::{JsonFormatter, TextFormatter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key=value` lines (default)
    ///
    /// Example: `time="2025-01-08T10:30:45Z" level=info msg="Request processed"`
    #[default]
    Text,

    /// One JSON object per line
    ///
    /// Example: `{"level":"info","msg":"Request processed","time":"2025-01-08T10:30:45Z"}`
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: OutputFormat,
    pub timestamp_format: TimestampFormat,
    pub disable_timestamp: bool,
}

impl LoggerConfig {
    /// Parse a configuration from JSON
    ///
    /// # Example
    ///
    /// ```
    /// use rust_hooked_logger::{LoggerConfig, LogLevel, OutputFormat};
    ///
    /// let config = LoggerConfig::from_json(r#"{"level":"debug","format":"json"}"#).unwrap();
    /// assert_eq!(config.level, LogLevel::Debug);
    /// assert_eq!(config.format, OutputFormat::Json);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde alone cannot reject
    pub fn validate(&self) -> Result<()> {
        self.timestamp_format.validate()
    }

    pub(crate) fn build_formatter(&self) -> Arc<dyn Formatter> {
        match self.format {
            OutputFormat::Text => Arc::new(
                TextFormatter::new()
                    .timestamp_format(self.timestamp_format.clone())
                    .disable_timestamp(self.disable_timestamp),
            ),
            OutputFormat::Json => Arc::new(
                JsonFormatter::new()
                    .timestamp_format(self.timestamp_format.clone())
                    .disable_timestamp(self.disable_timestamp),
            ),
        }
    }
}
