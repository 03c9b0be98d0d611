//! Hook trait and the per-level hook registry

use super::entry::Entry;
use super::error::{LoggerError, Result};
use super::isolate::catch_panic;
use super::log_level::LogLevel;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Observer invoked for every fired entry whose level it declared.
///
/// Hooks run inside the logger's critical section, before the entry is
/// formatted, so they may enrich the entry's fields or render it with
/// [`Entry::to_formatted_string`]. Logging through the firing logger from
/// `fire` deadlocks. A failing or panicking hook is reported and skipped;
/// it never stops other hooks or the write.
pub trait Hook: Send + Sync {
    /// Levels this hook wants to observe; [`LogLevel::ALL`] observes everything
    fn levels(&self) -> &[LogLevel];

    fn fire(&self, entry: &mut Entry) -> Result<()>;

    fn name(&self) -> &str {
        "hook"
    }
}

/// Hooks partitioned by level, each list in registration order.
///
/// Append-only through [`LevelHooks::add`]; the logger guards it with the
/// same lock that serializes firing.
#[derive(Clone, Default)]
pub struct LevelHooks {
    hooks: HashMap<LogLevel, Vec<Arc<dyn Hook>>>,
}

impl LevelHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under every level it declares
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        let mut seen: Vec<LogLevel> = Vec::with_capacity(LogLevel::ALL.len());
        for &level in hook.levels() {
            if seen.contains(&level) {
                continue;
            }
            seen.push(level);
            self.hooks.entry(level).or_default().push(Arc::clone(&hook));
        }
    }

    pub fn for_level(&self, level: LogLevel) -> &[Arc<dyn Hook>] {
        self.hooks.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }

    /// Fire every hook registered for the entry's level.
    ///
    /// Returns one error per hook that failed or panicked.
    pub fn fire(&self, entry: &mut Entry) -> Vec<LoggerError> {
        let mut failures = Vec::new();

        for hook in self.for_level(entry.level()) {
            match catch_panic(|| hook.fire(entry)) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => failures.push(e),
                Err(panic_msg) => failures.push(LoggerError::hook(
                    hook.name(),
                    format!("panicked: {}", panic_msg),
                )),
            }
        }

        failures
    }
}

impl fmt::Debug for LevelHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for level in LogLevel::ALL {
            let count = self.for_level(level).len();
            if count > 0 {
                map.entry(&level, &count);
            }
        }
        map.finish()
    }
}
