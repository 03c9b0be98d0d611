//! Reference hook implementations

mod recorder;

pub use recorder::{new_null_logger, RecorderHook};
