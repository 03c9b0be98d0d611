//! Log entry structure and the firing protocol

use super::error::{LoggerError, PanicFault, Result};
use super::exit_handler;
use super::fields::{FieldValue, Fields, ERROR_KEY};
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerCore};
use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::sync::Weak;

/// One log record in flight.
///
/// Builder methods (`with_field`, `with_fields`, `with_error`) never mutate
/// the receiver: each returns a new entry with its own copy of the field
/// map. Level methods (`info`, `warn`, ...) fire a copy of the entry and
/// leave the receiver untouched, so one builder can be reused.
///
/// The back-reference to the logger is weak; an entry kept around by a hook
/// never keeps its logger alive.
#[derive(Debug, Clone)]
pub struct Entry {
    logger: Weak<LoggerCore>,
    level: LogLevel,
    message: String,
    data: Fields,
    time: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn new(logger: &Logger) -> Self {
        Self {
            logger: logger.downgrade(),
            level: LogLevel::default(),
            message: String::new(),
            data: Fields::new(),
            time: None,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &Fields {
        &self.data
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.data.get(key)
    }

    /// Time the entry was fired; `None` for entries that were never fired
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    /// The owning logger, if it still exists
    pub fn logger(&self) -> Option<Logger> {
        self.logger.upgrade().map(Logger::from_core)
    }

    /// Mutable access to the fields, for hooks enriching an entry while it fires
    pub fn data_mut(&mut self) -> &mut Fields {
        &mut self.data
    }

    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        self.with_fields([(key, value)])
    }

    /// Derive an entry whose fields are this entry's fields plus `fields`.
    ///
    /// New keys override inherited ones. Empty keys are ignored.
    #[must_use]
    pub fn with_fields<I, K, V>(&self, fields: I) -> Entry
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut data = self.data.clone();
        for (key, value) in fields {
            let key = key.into();
            if key.is_empty() {
                continue;
            }
            data.insert(key, value.into());
        }

        Entry {
            logger: self.logger.clone(),
            level: self.level,
            message: self.message.clone(),
            data,
            time: self.time,
        }
    }

    /// Attach `err` under the `"error"` key
    #[must_use]
    pub fn with_error<E>(&self, err: E) -> Entry
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_field(ERROR_KEY, FieldValue::error(err))
    }

    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        self.logger
            .upgrade()
            .is_some_and(|core| core.is_level_enabled(level))
    }

    /// Render this entry with its logger's formatter without writing it
    pub fn to_formatted_string(&self) -> Result<String> {
        let core = self.logger.upgrade().ok_or(LoggerError::LoggerDropped)?;
        let bytes = core.format(self)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Log at `level`. Returns `Err` only for Panic-level entries.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> std::result::Result<(), PanicFault> {
        self.log_fn(level, || message.into())
    }

    /// Like [`Entry::log`], but the message is only built if `level` is enabled
    pub fn log_fn<F>(&self, level: LogLevel, message: F) -> std::result::Result<(), PanicFault>
    where
        F: FnOnce() -> String,
    {
        match self.emit(level, message) {
            Some(entry) if level == LogLevel::Panic => Err(PanicFault::new(entry)),
            _ => Ok(()),
        }
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.emit(LogLevel::Trace, || message.into());
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.emit(LogLevel::Debug, || message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(LogLevel::Info, || message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.emit(LogLevel::Warn, || message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(LogLevel::Error, || message.into());
    }

    /// Log, run the exit handlers, then call the logger's exit function with 1.
    ///
    /// With the default exit function this never returns.
    pub fn fatal(&self, message: impl Into<String>) {
        self.emit(LogLevel::Fatal, || message.into());
    }

    /// Log, run the exit handlers, then hand back the fired entry as a fault.
    pub fn panic(&self, message: impl Into<String>) -> PanicFault {
        // Panic passes every threshold, so emit only returns None if that changes.
        let fired = self.emit(LogLevel::Panic, || message.into());
        PanicFault::new(fired.unwrap_or_else(|| self.derive(LogLevel::Panic, String::new())))
    }

    #[cfg(test)]
    pub(crate) fn at_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn derive(&self, level: LogLevel, message: String) -> Entry {
        Entry {
            logger: self.logger.clone(),
            level,
            message,
            data: self.data.clone(),
            time: None,
        }
    }

    /// Run the firing protocol; `None` when the level was filtered out.
    fn emit<F>(&self, level: LogLevel, message: F) -> Option<Entry>
    where
        F: FnOnce() -> String,
    {
        let core = self.logger.upgrade();
        if let Some(core) = &core {
            if !core.is_level_enabled(level) {
                return None;
            }
        }

        let mut entry = self.derive(level, message());

        match core {
            Some(core) => {
                entry.time = Some(Utc::now());
                core.dispatch(&mut entry);

                match level {
                    LogLevel::Fatal => core.exit(1),
                    LogLevel::Panic => exit_handler::run_exit_handlers(),
                    _ => {}
                }
            }
            // Nothing left to write to; escalations still apply.
            None => match level {
                LogLevel::Fatal => exit_handler::exit(1),
                LogLevel::Panic => exit_handler::run_exit_handlers(),
                _ => {}
            },
        }

        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    fn quiet_logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder().output(sink.clone()).build();
        (logger, sink)
    }

    #[test]
    fn test_with_fields_does_not_mutate_receiver() {
        let (logger, _sink) = quiet_logger();
        let base = logger.with_field("animal", "walrus");
        let derived = base.with_fields([("size", 10), ("number", 8)]);

        assert_eq!(base.data().len(), 1);
        assert_eq!(derived.data().len(), 3);
        assert!(base.field("size").is_none());
    }

    #[test]
    fn test_new_keys_override_inherited() {
        let (logger, _sink) = quiet_logger();
        let base = logger.with_field("number", 8);
        let derived = base.with_field("number", 122);

        assert_eq!(base.field("number"), Some(&FieldValue::Int(8)));
        assert_eq!(derived.field("number"), Some(&FieldValue::Int(122)));
    }

    #[test]
    fn test_empty_keys_are_ignored() {
        let (logger, _sink) = quiet_logger();
        let entry = logger.with_field("", "nothing");
        assert!(entry.data().is_empty());
    }

    #[test]
    fn test_with_error_uses_error_key() {
        let (logger, _sink) = quiet_logger();
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing config");
        let entry = logger.with_error(err);

        assert_eq!(entry.field(ERROR_KEY).unwrap().to_string(), "missing config");
    }

    #[test]
    fn test_builder_entry_is_never_stamped() {
        let (logger, sink) = quiet_logger();
        let entry = logger.with_field("a", 1);
        entry.info("first");
        entry.info("second");

        assert!(entry.time().is_none());
        assert_eq!(entry.message(), "");
        assert_eq!(sink.lines().len(), 2);
    }

    #[test]
    fn test_dropped_logger_is_a_no_op() {
        let (logger, sink) = quiet_logger();
        let entry = logger.with_field("a", 1);
        drop(logger);

        entry.info("nobody listens");
        assert!(entry.logger().is_none());
        assert!(!entry.is_level_enabled(LogLevel::Info));
        assert!(matches!(
            entry.to_formatted_string(),
            Err(LoggerError::LoggerDropped)
        ));
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn test_lazy_message_not_built_when_disabled() {
        let (logger, _sink) = quiet_logger();
        let mut called = false;
        let _ = logger.with_field("a", 1).log_fn(LogLevel::Debug, || {
            called = true;
            "expensive".to_string()
        });
        assert!(!called);
    }

    #[test]
    fn test_panic_returns_fired_entry() {
        let (logger, sink) = quiet_logger();
        let fault = logger.with_field("size", 9009).panic("It's over 9000!");

        assert_eq!(fault.entry().level(), LogLevel::Panic);
        assert_eq!(fault.entry().message(), "It's over 9000!");
        assert!(fault.entry().time().is_some());
        assert_eq!(fault.to_string(), "panic: It's over 9000!");
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_log_with_panic_level_is_err() {
        let (logger, _sink) = quiet_logger();
        assert!(logger.log(LogLevel::Error, "fine").is_ok());
        assert!(logger.log(LogLevel::Panic, "not fine").is_err());
    }

    #[test]
    fn test_to_formatted_string_uses_logger_formatter() {
        let (logger, sink) = quiet_logger();
        logger.set_formatter(crate::formatters::TextFormatter::new().disable_timestamp(true));

        let rendered = logger.with_field("a", 1).to_formatted_string().unwrap();
        assert_eq!(rendered, "level=info a=1\n");
        assert!(sink.contents().is_empty());
    }
}
