//! Stable exit codes for the `example` command.

/// Command succeeded.
pub const OK: i32 = 0;
/// Any failure after argument parsing (start-up, config or run).
pub const INVALID: i32 = 1;
