//! Error types for PressForge scripts
//!
//! Provides a single error enum for the shared layer with:
//! - Distinct variants for different failure modes
//! - A coarse `ErrorKind` taxonomy used by batch drivers to decide
//!   whether a failure is reportable-and-skippable or fatal

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Coarse classification of failures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Journal, article, issue or file missing
    NotFound,
    /// Natural-key collision (normally avoided with get-or-create)
    Conflict,
    /// Filesystem payload problems
    IoFailure,
    /// Bad operator input
    Validation,
    /// Database, configuration and everything else
    Internal,
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("{resource_type} not found: {id}")]
    NotFound { resource_type: String, id: String },

    // Conflict errors
    #[error("Duplicate resource: {message}")]
    Duplicate { message: String },

    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },

    // Storage errors
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Checksum mismatch copying {}", path.display())]
    ChecksumMismatch { path: PathBuf },

    // Input format errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Internal errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Shorthand for a `NotFound` error
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        AppError::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a `Storage` error
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Storage {
            path: path.into(),
            source,
        }
    }

    /// Get the taxonomy bucket for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Duplicate { .. } => ErrorKind::Conflict,
            AppError::Storage { .. } | AppError::ChecksumMismatch { .. } => ErrorKind::IoFailure,
            AppError::Validation { .. } | AppError::Csv(_) | AppError::Xml(_) => {
                ErrorKind::Validation
            }
            AppError::Database(_)
            | AppError::DatabaseConnection { .. }
            | AppError::Serialization(_)
            | AppError::Configuration { .. }
            | AppError::Internal { .. }
            | AppError::Other(_) => ErrorKind::Internal,
        }
    }

    /// True when the source payload of a file copy simply does not exist
    pub fn is_missing_payload(&self) -> bool {
        matches!(
            self,
            AppError::Storage { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}
