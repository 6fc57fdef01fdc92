//! Replication options and outcome

use crate::errors::ReplicationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a replication run behaves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicationOptions {
    /// Look for an earlier copy through its `pubid` identifier and update it
    /// in place; also mints a DOI for the copy
    pub update_existing: bool,

    /// Language whose translated title and galleys are preferred
    pub target_language: Option<String>,

    /// Language codes the press supports; empty accepts any hint
    pub languages: Vec<String>,
}

impl Default for ReplicationOptions {
    fn default() -> Self {
        Self {
            update_existing: true,
            target_language: None,
            languages: Vec::new(),
        }
    }
}

impl ReplicationOptions {
    /// Reject a language hint the press does not support
    pub fn validate(&self) -> Result<(), ReplicationError> {
        match &self.target_language {
            Some(lang) if !self.languages.is_empty() && !self.languages.contains(lang) => {
                Err(ReplicationError::UnsupportedLanguage(lang.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// Result of copying one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationOutcome {
    pub source_id: i32,
    pub target_id: i32,
    /// False when an earlier copy was updated in place
    pub created: bool,
    /// Public landing page of the copy
    pub url: String,
    pub doi: Option<String>,
    /// Non-fatal problems, e.g. payloads missing from storage
    pub warnings: Vec<String>,
}

impl fmt::Display for ReplicationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copied article {} to {} ({})",
            self.source_id, self.target_id, self.url
        )
    }
}
