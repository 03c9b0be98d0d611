//! Formatter trait for rendering entries

use super::{entry::Entry, error::Result};

/// Renders a fired entry to the bytes written to the sink.
///
/// Called with the logger's lock held, after hooks have run. An `Err` (or a
/// panic) drops the entry from the sink and is reported on the logger's
/// diagnostic stream.
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &Entry) -> Result<Vec<u8>>;

    fn name(&self) -> &str {
        "custom"
    }
}
