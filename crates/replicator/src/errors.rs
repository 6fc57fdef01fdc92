//! Replicator error types

use pressforge_common::errors::{AppError, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplicationError {
    #[error("Journal not found: {0}")]
    JournalNotFound(String),

    #[error("Issue {issue_id} not found in journal {journal}")]
    IssueNotFound { journal: String, issue_id: i32 },

    #[error("Language {0} is not supported by the press")]
    UnsupportedLanguage(String),

    #[error("DOI pattern error: {0}")]
    DoiPattern(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl ReplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReplicationError::JournalNotFound(_) | ReplicationError::IssueNotFound { .. } => {
                ErrorKind::NotFound
            }
            ReplicationError::UnsupportedLanguage(_) => ErrorKind::Validation,
            ReplicationError::DoiPattern(_) => ErrorKind::Internal,
            ReplicationError::App(e) => e.kind(),
        }
    }
}

impl From<sea_orm::DbErr> for ReplicationError {
    fn from(e: sea_orm::DbErr) -> Self {
        ReplicationError::App(AppError::Database(e))
    }
}
