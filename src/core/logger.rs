//! Main logger implementation

use super::{
    entry::Entry,
    error::{LoggerError, PanicFault, Result},
    exit_handler,
    fields::FieldValue,
    formatter::Formatter,
    hooks::{Hook, LevelHooks},
    isolate::catch_panic,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::formatters::TextFormatter;
use parking_lot::{Mutex, RwLock};
use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Weak};

/// Function invoked with the exit status after a Fatal entry or [`Logger::exit`]
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// Byte destination for rendered entries
pub type Sink = Box<dyn Write + Send>;

/// Handle to a logger. Cloning is cheap and every clone shares the same
/// sink, formatter, hooks and threshold.
///
/// Hook firing, formatting and writing for one entry all happen inside a
/// single critical section, so entries fired concurrently on one logger are
/// never interleaved in the sink and hooks see them in write order. A hook
/// must not log through the logger that is firing it, but it may render
/// its entry with [`Entry::to_formatted_string`].
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
}

pub(crate) struct LoggerCore {
    level: AtomicU8,
    state: Mutex<LoggerState>,
    // Read without `state` so hooks can render the entry being fired.
    // Swapped only while `state` is held.
    formatter: RwLock<Arc<dyn Formatter>>,
    metrics: LoggerMetrics,
}

struct LoggerState {
    out: Sink,
    diagnostics: Sink,
    hooks: LevelHooks,
    exit_fn: ExitFn,
}

fn default_exit_fn() -> ExitFn {
    Arc::new(|code| std::process::exit(code))
}

impl LoggerCore {
    #[inline]
    pub(crate) fn is_level_enabled(&self, level: LogLevel) -> bool {
        level.enabled_by(self.level())
    }

    fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub(crate) fn format(&self, entry: &Entry) -> Result<Vec<u8>> {
        let formatter = self.formatter.read().clone();
        formatter.format(entry)
    }

    /// Fire hooks, format and write `entry` in one critical section.
    ///
    /// Failures are reported to the diagnostic stream and counted; none of
    /// them reach the caller.
    pub(crate) fn dispatch(&self, entry: &mut Entry) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        for failure in state.hooks.fire(entry) {
            self.metrics.record_hook_failure();
            report(
                &mut state.diagnostics,
                format_args!("[LOGGER ERROR] Failed to fire hook: {}", failure),
            );
        }

        let formatter = self.formatter.read().clone();
        let bytes = match catch_panic(|| formatter.format(entry)) {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                self.metrics.record_format_failure();
                report(
                    &mut state.diagnostics,
                    format_args!("[LOGGER ERROR] Failed to format entry: {}", e),
                );
                return;
            }
            Err(panic_msg) => {
                self.metrics.record_format_failure();
                report(
                    &mut state.diagnostics,
                    format_args!(
                        "[LOGGER CRITICAL] Formatter '{}' panicked: {}",
                        formatter.name(),
                        panic_msg
                    ),
                );
                return;
            }
        };

        let out = &mut state.out;
        match catch_panic(|| out.write_all(&bytes)) {
            Ok(Ok(())) => {
                self.metrics.record_logged();
            }
            Ok(Err(e)) => {
                self.metrics.record_write_failure();
                report(
                    &mut state.diagnostics,
                    format_args!(
                        "[LOGGER ERROR] Failed to write to sink: {}",
                        LoggerError::from(e)
                    ),
                );
            }
            Err(panic_msg) => {
                self.metrics.record_write_failure();
                report(
                    &mut state.diagnostics,
                    format_args!("[LOGGER CRITICAL] Sink panicked during write: {}", panic_msg),
                );
            }
        }
    }

    /// Run exit handlers, then the exit function. The lock is not held
    /// while either runs.
    pub(crate) fn exit(&self, code: i32) {
        let exit_fn = Arc::clone(&self.state.lock().exit_fn);
        exit_handler::run_exit_handlers();
        exit_fn(code);
    }
}

/// Write one line to the diagnostic stream. If that fails too there is
/// nowhere left to report it.
fn report(diagnostics: &mut Sink, args: fmt::Arguments<'_>) {
    let _ = writeln!(diagnostics, "{}", args);
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Logger::builder().build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_hooked_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .formatter(JsonFormatter::new())
    ///     .output(std::io::sink())
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn from_core(core: Arc<LoggerCore>) -> Self {
        Self { core }
    }

    pub(crate) fn downgrade(&self) -> Weak<LoggerCore> {
        Arc::downgrade(&self.core)
    }

    /// Current threshold
    pub fn level(&self) -> LogLevel {
        self.core.level()
    }

    pub fn set_level(&self, level: LogLevel) {
        let _guard = self.core.state.lock();
        self.core.level.store(level as u8, Ordering::Release);
    }

    #[inline]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        self.core.is_level_enabled(level)
    }

    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        let _guard = self.core.state.lock();
        *self.core.formatter.write() = Arc::new(formatter);
    }

    /// Replace the sink. The previous sink is flushed and dropped.
    pub fn set_output<W: Write + Send + 'static>(&self, out: W) {
        let mut state = self.core.state.lock();
        if let Err(e) = state.out.flush() {
            report(
                &mut state.diagnostics,
                format_args!(
                    "[LOGGER ERROR] Failed to flush replaced sink: {}",
                    LoggerError::from(e)
                ),
            );
        }
        state.out = Box::new(out);
    }

    /// Replace the stream internal failures are reported to
    pub fn set_diagnostics<W: Write + Send + 'static>(&self, diagnostics: W) {
        self.core.state.lock().diagnostics = Box::new(diagnostics);
    }

    pub fn set_exit_fn<F>(&self, exit_fn: F)
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.core.state.lock().exit_fn = Arc::new(exit_fn);
    }

    pub fn add_hook(&self, hook: Arc<dyn Hook>) {
        self.core.state.lock().hooks.add(hook);
    }

    /// Swap the whole hook registry, returning the previous one
    pub fn replace_hooks(&self, hooks: LevelHooks) -> LevelHooks {
        std::mem::replace(&mut self.core.state.lock().hooks, hooks)
    }

    pub fn flush(&self) -> Result<()> {
        self.core.state.lock().out.flush()?;
        Ok(())
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.core.metrics
    }

    /// Run the exit handlers, then this logger's exit function with `code`
    pub fn exit(&self, code: i32) {
        self.core.exit(code);
    }

    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        Entry::new(self).with_field(key, value)
    }

    pub fn with_fields<I, K, V>(&self, fields: I) -> Entry
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Entry::new(self).with_fields(fields)
    }

    pub fn with_error<E>(&self, err: E) -> Entry
    where
        E: StdError + Send + Sync + 'static,
    {
        Entry::new(self).with_error(err)
    }

    /// Log at `level`. Returns `Err` only for Panic-level entries.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> std::result::Result<(), PanicFault> {
        Entry::new(self).log(level, message)
    }

    pub fn log_fn<F>(&self, level: LogLevel, message: F) -> std::result::Result<(), PanicFault>
    where
        F: FnOnce() -> String,
    {
        if !self.is_level_enabled(level) {
            return Ok(());
        }
        Entry::new(self).log_fn(level, message)
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        if self.is_level_enabled(LogLevel::Trace) {
            Entry::new(self).trace(message);
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        if self.is_level_enabled(LogLevel::Debug) {
            Entry::new(self).debug(message);
        }
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        if self.is_level_enabled(LogLevel::Info) {
            Entry::new(self).info(message);
        }
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        if self.is_level_enabled(LogLevel::Warn) {
            Entry::new(self).warn(message);
        }
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        if self.is_level_enabled(LogLevel::Error) {
            Entry::new(self).error(message);
        }
    }

    pub fn fatal(&self, message: impl Into<String>) {
        Entry::new(self).fatal(message);
    }

    pub fn panic(&self, message: impl Into<String>) -> PanicFault {
        Entry::new(self).panic(message)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

impl Drop for LoggerState {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Defaults: threshold Info, text formatter, stderr sink, stderr
/// diagnostics, no hooks, `std::process::exit` as exit function.
pub struct LoggerBuilder {
    level: LogLevel,
    formatter: Option<Arc<dyn Formatter>>,
    out: Option<Sink>,
    diagnostics: Option<Sink>,
    hooks: Vec<Arc<dyn Hook>>,
    exit_fn: Option<ExitFn>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            formatter: None,
            out: None,
            diagnostics: None,
            hooks: Vec::new(),
            exit_fn: None,
        }
    }

    /// Start from a deserialized configuration
    pub fn from_config(config: &super::config::LoggerConfig) -> Self {
        let mut builder = Self::new().level(config.level);
        builder.formatter = Some(config.build_formatter());
        builder
    }

    /// Set the threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Set the sink rendered entries are written to
    #[must_use = "builder methods return a new value"]
    pub fn output<W: Write + Send + 'static>(mut self, out: W) -> Self {
        self.out = Some(Box::new(out));
        self
    }

    /// Set the stream internal failures are reported to
    #[must_use = "builder methods return a new value"]
    pub fn diagnostics<W: Write + Send + 'static>(mut self, diagnostics: W) -> Self {
        self.diagnostics = Some(Box::new(diagnostics));
        self
    }

    /// Register a hook; hooks fire in registration order
    #[must_use = "builder methods return a new value"]
    pub fn hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Replace `std::process::exit` as the function called after Fatal entries
    ///
    /// # Example
    ///
    /// ```
    /// use rust_hooked_logger::prelude::*;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let status = Arc::new(AtomicI32::new(0));
    /// let seen = Arc::clone(&status);
    /// let logger = Logger::builder()
    ///     .output(std::io::sink())
    ///     .exit_fn(move |code| seen.store(code, Ordering::SeqCst))
    ///     .build();
    ///
    /// logger.fatal("disk full");
    /// assert_eq!(status.load(Ordering::SeqCst), 1);
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn exit_fn<F>(mut self, exit_fn: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit_fn = Some(Arc::new(exit_fn));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut hooks = LevelHooks::new();
        for hook in self.hooks {
            hooks.add(hook);
        }

        let state = LoggerState {
            out: self.out.unwrap_or_else(|| Box::new(io::stderr())),
            diagnostics: self.diagnostics.unwrap_or_else(|| Box::new(io::stderr())),
            hooks,
            exit_fn: self.exit_fn.unwrap_or_else(default_exit_fn),
        };

        Logger {
            core: Arc::new(LoggerCore {
                level: AtomicU8::new(self.level as u8),
                state: Mutex::new(state),
                formatter: RwLock::new(
                    self.formatter
                        .unwrap_or_else(|| Arc::new(TextFormatter::new())),
                ),
                metrics: LoggerMetrics::new(),
            }),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
