//! annsync-daemon library target.
//!
//! Exposes the scheduler for integration tests.
//! The binary `main.rs` depends on this library target.

pub mod scheduler;
