//! Core logger types and traits

pub mod config;
pub mod entry;
pub mod error;
pub mod exit_handler;
pub mod fields;
pub mod formatter;
pub mod hooks;
mod isolate;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use config::{LoggerConfig, OutputFormat};
pub use entry::Entry;
pub use error::{LoggerError, PanicFault, Result};
pub use exit_handler::{exit, exit_handler_count, register_exit_handler, run_exit_handlers};
pub use fields::{FieldValue, Fields, ERROR_KEY};
pub use formatter::Formatter;
pub use hooks::{Hook, LevelHooks};
pub use log_level::LogLevel;
pub use logger::{ExitFn, Logger, LoggerBuilder, Sink};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
