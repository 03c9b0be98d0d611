//! Process-wide exit handlers
//!
//! Handlers give code that logs at Fatal level a chance to release external
//! resources (close connections, flush buffers) before the process goes
//! away. They run, in registration order, before every Fatal-triggered
//! termination, before a Panic fault is handed back, and on [`exit`].
//!
//! The registry only grows. A handler that panics is reported to stderr and
//! the remaining handlers still run.

use super::isolate::catch_panic;
use parking_lot::{const_mutex, Mutex};
use std::sync::Arc;

type ExitHandler = Arc<dyn Fn() + Send + Sync>;

static HANDLERS: Mutex<Vec<ExitHandler>> = const_mutex(Vec::new());

/// Append `handler` to the process-wide exit handler list
///
/// # Example
///
/// ```no_run
/// use rust_hooked_logger::{exit, register_exit_handler};
///
/// register_exit_handler(|| eprintln!("closing database connections"));
/// exit(3);
/// ```
pub fn register_exit_handler<F>(handler: F)
where
    F: Fn() + Send + Sync + 'static,
{
    HANDLERS.lock().push(Arc::new(handler));
}

/// Number of registered handlers
pub fn exit_handler_count() -> usize {
    HANDLERS.lock().len()
}

/// Run every registered handler once, in registration order.
///
/// The registry lock is released before the first handler runs, so a
/// handler may log or register further handlers (those run next time).
pub fn run_exit_handlers() {
    let handlers: Vec<ExitHandler> = HANDLERS.lock().clone();

    for (idx, handler) in handlers.iter().enumerate() {
        if let Err(panic_msg) = catch_panic(|| handler()) {
            eprintln!(
                "[LOGGER ERROR] Exit handler #{} panicked: {}. Remaining handlers continue.",
                idx, panic_msg
            );
        }
    }
}

/// Run every exit handler, then terminate the process with `code`
pub fn exit(code: i32) -> ! {
    run_exit_handlers();
    std::process::exit(code)
}
