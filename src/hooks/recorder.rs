//! In-memory recorder hook for test assertions

use crate::core::{Entry, Hook, LogLevel, Logger, Result};
use crate::global;
use parking_lot::RwLock;
use std::sync::Arc;

/// Keeps a copy of every entry it observes, on every level.
///
/// Entries are stored by value, so later changes to a builder entry never
/// show up in the recorded history.
///
/// # Example
///
/// ```
/// use rust_hooked_logger::hooks::new_null_logger;
///
/// let (logger, hook) = new_null_logger();
/// logger.warn("w");
/// logger.error("e");
///
/// let messages: Vec<_> = hook.all_entries().iter().map(|e| e.message().to_string()).collect();
/// assert_eq!(messages, ["w", "e"]);
///
/// hook.reset();
/// assert!(hook.last_entry().is_none());
/// ```
#[derive(Debug, Default)]
pub struct RecorderHook {
    entries: RwLock<Vec<Entry>>,
}

impl RecorderHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder and attach it to `logger`
    pub fn new_local(logger: &Logger) -> Arc<Self> {
        let hook = Arc::new(Self::new());
        logger.add_hook(Arc::clone(&hook) as Arc<dyn Hook>);
        hook
    }

    /// Create a recorder and attach it to the global logger
    pub fn new_global() -> Arc<Self> {
        Self::new_local(global::logger())
    }

    pub fn last_entry(&self) -> Option<Entry> {
        self.entries.read().last().cloned()
    }

    pub fn all_entries(&self) -> Vec<Entry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn reset(&self) {
        self.entries.write().clear();
    }
}

impl Hook for RecorderHook {
    fn levels(&self) -> &[LogLevel] {
        &LogLevel::ALL
    }

    fn fire(&self, entry: &mut Entry) -> Result<()> {
        self.entries.write().push(entry.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

/// A logger that discards its output, with a recorder attached
pub fn new_null_logger() -> (Logger, Arc<RecorderHook>) {
    let logger = Logger::builder().output(std::io::sink()).build();
    let hook = RecorderHook::new_local(&logger);
    (logger, hook)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_firing_order() {
        let (logger, hook) = new_null_logger();
        logger.warn("w");
        logger.error("e");

        let levels: Vec<_> = hook.all_entries().iter().map(Entry::level).collect();
        assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Error]);
        assert_eq!(hook.last_entry().unwrap().message(), "e");
    }

    #[test]
    fn test_reset_empties_history() {
        let (logger, hook) = new_null_logger();
        logger.info("one");
        assert_eq!(hook.len(), 1);

        hook.reset();
        assert!(hook.is_empty());
        assert!(hook.last_entry().is_none());
    }

    #[test]
    fn test_recorded_entries_do_not_alias_builder() {
        let (logger, hook) = new_null_logger();
        let base = logger.with_field("k", "v1");
        base.info("first");
        let _later = base.with_field("k", "v2");

        let recorded = hook.last_entry().unwrap();
        assert_eq!(recorded.field("k").and_then(|v| v.as_str()), Some("v1"));
    }

    #[test]
    fn test_recorder_does_not_keep_logger_alive() {
        let (logger, hook) = new_null_logger();
        logger.info("kept");
        drop(logger);

        let recorded = hook.last_entry().unwrap();
        assert!(recorded.logger().is_none());
    }
}
