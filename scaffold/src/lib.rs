//! Minimal project scaffold: root discovery, env bootstrap and per-script
//! logging, plus one example command.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (relative script paths, level
//!   names, line rendering, timestamps). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (marker search, `.env` loading,
//!   config reads). Behind small seams such as [`io::root::RootLocator`] so
//!   tests can substitute them.
//!
//! [`bootstrap`] wires them together in the required order (env first, then
//! the [`logging`] subscriber); [`example`] implements the example command.

pub mod bootstrap;
pub mod core;
pub mod example;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
