//! PressForge Common Library
//!
//! Shared code for the PressForge maintenance scripts including:
//! - Database models and repository patterns
//! - Article payload storage
//! - Error types and handling
//! - Configuration management

pub mod config;
pub mod db;
pub mod errors;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use errors::{AppError, ErrorKind, Result};
pub use storage::FileStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
