//! Deterministic, pure logic shared by the scaffold.
//!
//! Core modules must be free of I/O side effects. They operate on paths,
//! timestamps and event fields in memory and return deterministic outputs
//! suitable for tests.

pub mod level;
pub mod line;
pub mod script_path;
pub mod timestamp;
