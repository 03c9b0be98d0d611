//! Error types for the logger system

use super::entry::Entry;
use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A hook could not process an entry
    #[error("Hook '{hook}' failed: {message}")]
    Hook { hook: String, message: String },

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    Formatter {
        format_type: String,
        message: String,
    },

    /// Sink write or flush failure
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unknown level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The logger an entry points back to no longer exists
    #[error("Logger dropped before entry was fired")]
    LoggerDropped,
}

impl LoggerError {
    /// Create a hook error
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Hook {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Formatter {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Fault produced by a Panic-level entry.
///
/// Returned by value instead of unwinding. Callers who want the process to
/// abort the current thread can call [`PanicFault::raise`]; everyone else
/// can inspect the entry and keep logging.
#[must_use = "a PanicFault carries the entry that triggered it; handle it or call raise()"]
#[derive(Debug, Clone)]
pub struct PanicFault {
    entry: Entry,
}

impl PanicFault {
    pub(crate) fn new(entry: Entry) -> Self {
        Self { entry }
    }

    /// The fired entry
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn into_entry(self) -> Entry {
        self.entry
    }

    /// Unwind the current thread with this fault as the panic payload.
    ///
    /// The payload can be recovered with `std::panic::catch_unwind` and
    /// `downcast::<PanicFault>()`.
    pub fn raise(self) -> ! {
        std::panic::panic_any(self)
    }
}

impl fmt::Display for PanicFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panic: {}", self.entry.message())
    }
}

impl std::error::Error for PanicFault {}
