//! Batch driver: copy a selection of a journal's articles

use crate::errors::ReplicationError;
use crate::options::{ReplicationOptions, ReplicationOutcome};
use crate::replicator::Replicator;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

/// Which source articles a batch copies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleScope {
    /// One article of the source journal
    Article(i32),
    /// Articles whose primary issue is this issue of the source journal
    Issue(i32),
    /// Every article of the source journal
    Journal,
}

/// Per-article results of a batch
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub copied: Vec<ReplicationOutcome>,
    /// Source article IDs whose copy failed and was rolled back, with the error
    pub failed: Vec<(i32, String)>,
    /// Requested article IDs that do not exist in the source journal
    pub missing: Vec<i32>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.missing.is_empty()
    }
}

impl Replicator {
    /// Copy the selected articles of `source_code` into `target_code`.
    ///
    /// Unknown journals, an unknown issue or an unsupported language abort the
    /// batch before anything is written. Each article is copied in its own
    /// transaction and a failing article does not stop the others.
    #[instrument(skip(self, options), fields(source = %source_code, target = %target_code))]
    pub async fn copy_articles(
        &self,
        source_code: &str,
        target_code: &str,
        scope: ArticleScope,
        options: &ReplicationOptions,
    ) -> Result<BatchReport, ReplicationError> {
        options.validate()?;

        let repo = self.pool().repository();
        let source = repo
            .find_journal_by_code(source_code)
            .await?
            .ok_or_else(|| ReplicationError::JournalNotFound(source_code.to_string()))?;
        let target = repo
            .find_journal_by_code(target_code)
            .await?
            .ok_or_else(|| ReplicationError::JournalNotFound(target_code.to_string()))?;

        let mut report = BatchReport::default();

        let articles = match scope {
            ArticleScope::Article(id) => match repo.find_article_in_journal(source.id, id).await? {
                Some(article) => vec![article],
                None => {
                    warn!(article_id = id, "Article not found in source journal");
                    report.missing.push(id);
                    Vec::new()
                }
            },
            ArticleScope::Issue(issue_id) => {
                let issue = repo.find_issue(issue_id).await?;
                if issue.map(|i| i.journal_id) != Some(source.id) {
                    return Err(ReplicationError::IssueNotFound {
                        journal: source.code.clone(),
                        issue_id,
                    });
                }
                repo.list_articles_by_primary_issue(source.id, issue_id).await?
            }
            ArticleScope::Journal => repo.list_articles_in_journal(source.id).await?,
        };

        info!(count = articles.len(), "Copying articles");

        for article in &articles {
            match self.replicate(article, &target, options).await {
                Ok(outcome) => report.copied.push(outcome),
                Err(e) => {
                    error!(article_id = article.id, error = %e, "Article copy failed");
                    report.failed.push((article.id, e.to_string()));
                }
            }
        }

        info!(
            copied = report.copied.len(),
            failed = report.failed.len(),
            missing = report.missing.len(),
            "Batch finished"
        );

        Ok(report)
    }
}
