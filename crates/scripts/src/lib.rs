//! PressForge scripts
//!
//! One-shot maintenance commands run against the platform database and file
//! store. Each command lives in its own module under [`commands`] and writes
//! its operator report to the writer it is given.

pub mod commands;
pub mod context;

pub use context::Context;
