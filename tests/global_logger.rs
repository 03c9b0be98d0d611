//! Tests for the process-wide default logger
//!
//! All tests share one global logger, so they run serially and start by
//! resetting its sink, threshold and hooks.

use rust_hooked_logger::global;
use rust_hooked_logger::hooks::RecorderHook;
use rust_hooked_logger::prelude::*;
use rust_hooked_logger::sinks::MemorySink;
use rust_hooked_logger::LevelHooks;
use serial_test::serial;
use std::sync::Arc;

fn reset_global() -> MemorySink {
    let sink = MemorySink::new();
    global::set_output(sink.clone());
    global::set_formatter(TextFormatter::new().disable_timestamp(true));
    global::set_level(LogLevel::Info);
    global::logger().replace_hooks(LevelHooks::new());
    sink
}

#[test]
#[serial]
fn test_free_functions_write_to_global_logger() {
    let sink = reset_global();

    global::info("hello");
    global::debug("hidden");
    global::with_field("animal", "walrus").warn("spotted");

    assert_eq!(
        sink.lines(),
        vec!["level=info msg=hello", "level=warning msg=spotted animal=walrus"]
    );
}

#[test]
#[serial]
fn test_global_threshold() {
    let sink = reset_global();

    global::set_level(LogLevel::Trace);
    assert_eq!(global::level(), LogLevel::Trace);
    assert!(global::is_level_enabled(LogLevel::Trace));

    global::trace("deep");
    assert_eq!(sink.lines(), vec!["level=trace msg=deep"]);
}

#[test]
#[serial]
fn test_recorder_attached_to_global() {
    let _sink = reset_global();
    let hook = RecorderHook::new_global();

    global::error("recorded");
    let fault = global::panic("also recorded");

    assert_eq!(hook.len(), 2);
    assert_eq!(fault.entry().message(), "also recorded");
}

#[test]
#[serial]
fn test_global_with_error_and_hooks() {
    let sink = reset_global();
    let recorder = Arc::new(RecorderHook::new());
    global::add_hook(recorder.clone());

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timeout");
    global::with_error(err).error("request failed");
    global::log(LogLevel::Info, "logged").expect("info never faults");

    assert_eq!(recorder.len(), 2);
    assert_eq!(
        sink.lines()[0],
        "level=error msg=\"request failed\" error=\"upstream timeout\""
    );
}
