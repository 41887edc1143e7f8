//! I/O helpers: filesystem root discovery, env loading and config reads.

pub mod config;
pub mod env;
pub mod root;
