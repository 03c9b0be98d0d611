//! Logging macros with `format!`-style arguments.
//!
//! The message is only formatted when the level is enabled, so arguments
//! that are expensive to render cost nothing when filtered out. Every
//! macro accepts either a [`Logger`](crate::Logger) or an
//! [`Entry`](crate::Entry) as its first argument.
//!
//! # Examples
//!
//! ```
//! use rust_hooked_logger::prelude::*;
//! use rust_hooked_logger::{fields, info, warn};
//!
//! let logger = Logger::builder().output(std::io::sink()).build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let entry = logger.with_fields(fields! { "user_id" => 42, "action" => "login" });
//! warn!(entry, "Suspicious {} attempt", "login");
//! ```

/// Log at an explicit level. Evaluates to `Result<(), PanicFault>`.
///
/// # Examples
///
/// ```
/// # use rust_hooked_logger::prelude::*;
/// # let logger = Logger::builder().output(std::io::sink()).build();
/// use rust_hooked_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// assert!(log!(logger, LogLevel::Panic, "giving up").is_err());
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fn($level, || format!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rust_hooked_logger::prelude::*;
/// # let logger = Logger::builder().level(LogLevel::Trace).output(std::io::sink()).build();
/// use rust_hooked_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+);
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+);
    }};
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Info, $($arg)+);
    }};
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_hooked_logger::prelude::*;
/// # let logger = Logger::builder().output(std::io::sink()).build();
/// use rust_hooked_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+);
    }};
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Error, $($arg)+);
    }};
}

/// Log a fatal message, run the exit handlers and call the exit function.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+);
    }};
}

/// Build a [`Fields`](crate::Fields) map from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use rust_hooked_logger::fields;
///
/// let fields = fields! { "animal" => "walrus", "size" => 10 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::FieldValue::from($value));
        )+
        fields
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldValue, LogLevel, Logger};
    use crate::formatters::TextFormatter;
    use crate::sinks::MemorySink;

    fn logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .formatter(TextFormatter::new().disable_timestamp(true))
            .output(sink.clone())
            .build();
        (logger, sink)
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = logger();
        info!(logger, "count={}", 3);
        warn!(logger, "plain");
        debug!(logger, "filtered {}", 1);

        assert_eq!(sink.lines(), vec!["level=info msg=\"count=3\"", "level=warning msg=plain"]);
    }

    #[test]
    fn test_macros_accept_entries() {
        let (logger, sink) = logger();
        let entry = logger.with_field("req", 7);
        error!(entry, "failed after {} tries", 2);

        assert_eq!(sink.contents(), "level=error msg=\"failed after 2 tries\" req=7\n");
    }

    #[test]
    fn test_arguments_not_evaluated_when_filtered() {
        let (logger, _sink) = logger();
        let mut rendered = false;
        let mut render = || {
            rendered = true;
            "costly"
        };
        trace!(logger, "{}", render());

        assert!(!rendered);
    }

    #[test]
    fn test_log_macro_returns_fault_for_panic() {
        let (logger, _sink) = logger();
        let fault = log!(logger, LogLevel::Panic, "code {}", 9).unwrap_err();
        assert_eq!(fault.entry().message(), "code 9");
    }

    #[test]
    fn test_fields_macro() {
        let fields = fields! { "a" => 1, "b" => "two", "c" => true };
        assert_eq!(fields.get("a"), Some(&FieldValue::Int(1)));
        assert_eq!(fields.get("b"), Some(&FieldValue::from("two")));
        assert!(fields! {}.is_empty());
    }
}
