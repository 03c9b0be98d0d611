//! # Rust Hooked Logger
//!
//! A structured logging engine: entries carry key/value fields, pass a
//! severity threshold, are handed to level-selected hooks, rendered by a
//! pluggable formatter and written to any `std::io::Write` sink.
//!
//! ## Features
//!
//! - **Copy-on-write entries**: `with_field` chains never mutate the entry they start from
//! - **Hooks**: observers per level, fired in registration order, failures isolated
//! - **Serialized writes**: hooks, formatting and writing for one entry share one critical section
//! - **Exit handlers**: process-wide callbacks run before Fatal-triggered termination
//! - **Recoverable panics**: Panic-level logging returns a [`PanicFault`] instead of unwinding
//!
//! ## Quick start
//!
//! ```
//! use rust_hooked_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .formatter(JsonFormatter::new())
//!     .output(std::io::sink())
//!     .build();
//!
//! logger
//!     .with_field("animal", "walrus")
//!     .with_field("size", 10)
//!     .info("A group of walrus emerges from the ocean");
//! ```

pub mod core;
pub mod formatters;
pub mod global;
pub mod hooks;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Entry, FieldValue, Fields, Formatter, Hook, LogLevel, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, OutputFormat, PanicFault, Result, TimestampFormat,
    };
    pub use crate::formatters::{JsonFormatter, TextFormatter};
    pub use crate::hooks::RecorderHook;
}

pub use crate::core::{
    exit, exit_handler_count, register_exit_handler, run_exit_handlers, Entry, ExitFn,
    FieldValue, Fields, Formatter, Hook, LevelHooks, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, PanicFault, Result, Sink,
    TimestampFormat, ERROR_KEY,
};
pub use formatters::{JsonFormatter, TextFormatter};
