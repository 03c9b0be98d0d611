//! Basic logger usage example
//!
//! Demonstrates fields, levels, hooks and recovering from a Panic fault.
//!
//! Run with: cargo run --example basic_usage

use rust_hooked_logger::hooks::RecorderHook;
use rust_hooked_logger::prelude::*;

fn main() {
    println!("=== Rust Hooked Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .level(LogLevel::Trace)
        .formatter(TextFormatter::new())
        .output(std::io::stdout())
        .build();
    let recorder = RecorderHook::new_local(&logger);

    println!("1. Entries with fields:");
    logger
        .with_field("animal", "walrus")
        .with_field("size", 10)
        .info("A group of walrus emerges from the ocean");

    let base = logger.with_fields([("omg", FieldValue::from(true)), ("number", 122.into())]);
    base.warn("The group's number increased tremendously!");
    base.debug("Still counting");

    println!("\n2. Recovering from a panic fault:");
    let fault = logger
        .with_fields([("omg", FieldValue::from(true)), ("number", 100.into())])
        .panic("The ice breaks!");
    fault
        .entry()
        .with_field("recovered", true)
        .error(fault.to_string());

    println!("\n3. JSON output:");
    logger.set_formatter(JsonFormatter::new());
    logger.with_field("temperature", -4).info("Temperature changes");

    println!("\n4. Raising the threshold:");
    logger.set_level(LogLevel::Warn);
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\nRecorded {} entries", recorder.len());
    println!("\n=== Example completed successfully! ===");
}
