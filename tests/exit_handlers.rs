//! Exit handler tests
//!
//! The handler registry is process-wide and append-only, so every test in
//! this binary runs serially and only counts calls made after its own
//! registration.

use parking_lot::Mutex;
use rust_hooked_logger::prelude::*;
use rust_hooked_logger::sinks::MemorySink;
use rust_hooked_logger::{exit_handler_count, register_exit_handler, run_exit_handlers};
use serial_test::serial;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

fn recording_logger(sink: &MemorySink, status: &Arc<AtomicI32>) -> Logger {
    let status = Arc::clone(status);
    Logger::builder()
        .formatter(TextFormatter::new().disable_timestamp(true))
        .output(sink.clone())
        .exit_fn(move |code| status.store(code, Ordering::SeqCst))
        .build()
}

#[test]
#[serial]
fn test_handlers_run_in_order_and_survive_panics() {
    let calls = Arc::new(Mutex::new(Vec::new()));

    let before = exit_handler_count();
    for name in ["h1", "h2", "h3"] {
        let calls = Arc::clone(&calls);
        register_exit_handler(move || {
            calls.lock().push(name);
            if name == "h2" {
                panic!("h2 failed to close its connection");
            }
        });
    }
    assert_eq!(exit_handler_count(), before + 3);

    run_exit_handlers();

    assert_eq!(*calls.lock(), vec!["h1", "h2", "h3"]);
}

#[test]
#[serial]
fn test_fatal_runs_handlers_then_exit_fn() {
    let first = Arc::new(AtomicBool::new(false));
    let second = Arc::new(AtomicBool::new(false));
    let status = Arc::new(AtomicI32::new(0));
    let handlers_before_exit = Arc::new(AtomicBool::new(false));

    {
        let first = Arc::clone(&first);
        register_exit_handler(move || first.store(true, Ordering::SeqCst));
    }
    {
        let second = Arc::clone(&second);
        register_exit_handler(move || second.store(true, Ordering::SeqCst));
    }

    let sink = MemorySink::new();
    let logger = {
        let status = Arc::clone(&status);
        let first = Arc::clone(&first);
        let second = Arc::clone(&second);
        let ordered = Arc::clone(&handlers_before_exit);
        Logger::builder()
            .formatter(TextFormatter::new().disable_timestamp(true))
            .output(sink.clone())
            .exit_fn(move |code| {
                let both = first.load(Ordering::SeqCst) && second.load(Ordering::SeqCst);
                ordered.store(both, Ordering::SeqCst);
                status.store(code, Ordering::SeqCst);
            })
            .build()
    };

    logger.with_field("disk", "sda1").fatal("boom");

    assert!(first.load(Ordering::SeqCst));
    assert!(second.load(Ordering::SeqCst));
    assert!(handlers_before_exit.load(Ordering::SeqCst));
    assert_eq!(status.load(Ordering::SeqCst), 1);
    assert_eq!(sink.contents(), "level=fatal msg=boom disk=sda1\n");
}

#[test]
#[serial]
fn test_logger_exit_uses_supplied_code() {
    let runs = Arc::new(AtomicUsize::new(0));
    {
        let runs = Arc::clone(&runs);
        register_exit_handler(move || {
            runs.fetch_add(1, Ordering::SeqCst);
        });
    }

    let sink = MemorySink::new();
    let status = Arc::new(AtomicI32::new(0));
    let logger = recording_logger(&sink, &status);

    logger.exit(3);

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(status.load(Ordering::SeqCst), 3);
    assert!(sink.is_empty());
}

#[test]
#[serial]
fn test_panic_runs_handlers_once_and_returns_fault() {
    let runs = Arc::new(AtomicUsize::new(0));
    {
        let runs = Arc::clone(&runs);
        register_exit_handler(move || {
            runs.fetch_add(1, Ordering::SeqCst);
        });
    }

    let sink = MemorySink::new();
    let status = Arc::new(AtomicI32::new(0));
    let logger = recording_logger(&sink, &status);

    let fault = logger.panic("ice cracked");

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(status.load(Ordering::SeqCst), 0);
    assert_eq!(fault.entry().level(), LogLevel::Panic);
    assert_eq!(sink.contents(), "level=panic msg=\"ice cracked\"\n");
}

#[test]
#[serial]
fn test_handler_may_log_without_deadlock() {
    let sink = MemorySink::new();
    let status = Arc::new(AtomicI32::new(0));
    let logger = recording_logger(&sink, &status);

    {
        let logger = logger.clone();
        register_exit_handler(move || logger.info("flushing before exit"));
    }

    logger.fatal("shutting down");

    assert_eq!(
        sink.lines(),
        vec![
            "level=fatal msg=\"shutting down\"",
            "level=info msg=\"flushing before exit\"",
        ]
    );
    assert_eq!(status.load(Ordering::SeqCst), 1);
}
