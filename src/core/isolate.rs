//! Panic isolation for user-supplied callbacks

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Run `f`, turning a panic into its message.
///
/// Hooks, formatters, sinks and exit handlers all go through this so one
/// misbehaving callback cannot unwind into the caller that emitted the log
/// line.
pub(crate) fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_panic_passes_value_through() {
        assert_eq!(catch_panic(|| 42), Ok(42));
    }

    #[test]
    fn test_catch_panic_extracts_message() {
        let result: Result<(), String> = catch_panic(|| panic!("handler failed: {}", 7));
        assert_eq!(result, Err("handler failed: 7".to_string()));

        let result: Result<(), String> = catch_panic(|| std::panic::panic_any(13_u8));
        assert_eq!(result, Err("Unknown panic".to_string()));
    }
}
