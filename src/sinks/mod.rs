//! Reference sinks
//!
//! Any `std::io::Write + Send` value can be used as a logger output; this
//! module only adds the shared in-memory buffer used by tests and demos.

mod memory;

pub use memory::MemorySink;
