//! Process-wide default logger
//!
//! Created lazily on first use with the builder defaults (Info threshold,
//! text formatter, stderr). It can be reconfigured at runtime through the
//! setters below; all of them take the logger's lock.

use crate::core::{
    Entry, FieldValue, Formatter, Hook, LogLevel, Logger, PanicFault,
};
use std::error::Error as StdError;
use std::io::Write;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The global logger
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(Logger::new)
}

pub fn set_level(level: LogLevel) {
    logger().set_level(level);
}

pub fn level() -> LogLevel {
    logger().level()
}

pub fn is_level_enabled(level: LogLevel) -> bool {
    logger().is_level_enabled(level)
}

pub fn set_formatter<F: Formatter + 'static>(formatter: F) {
    logger().set_formatter(formatter);
}

pub fn set_output<W: Write + Send + 'static>(out: W) {
    logger().set_output(out);
}

pub fn add_hook(hook: Arc<dyn Hook>) {
    logger().add_hook(hook);
}

pub fn with_field(key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
    logger().with_field(key, value)
}

pub fn with_fields<I, K, V>(fields: I) -> Entry
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    logger().with_fields(fields)
}

pub fn with_error<E>(err: E) -> Entry
where
    E: StdError + Send + Sync + 'static,
{
    logger().with_error(err)
}

pub fn log(level: LogLevel, message: impl Into<String>) -> Result<(), PanicFault> {
    logger().log(level, message)
}

pub fn trace(message: impl Into<String>) {
    logger().trace(message);
}

pub fn debug(message: impl Into<String>) {
    logger().debug(message);
}

pub fn info(message: impl Into<String>) {
    logger().info(message);
}

pub fn warn(message: impl Into<String>) {
    logger().warn(message);
}

pub fn error(message: impl Into<String>) {
    logger().error(message);
}

pub fn fatal(message: impl Into<String>) {
    logger().fatal(message);
}

pub fn panic(message: impl Into<String>) -> PanicFault {
    logger().panic(message)
}
