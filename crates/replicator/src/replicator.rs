//! Article replication
//!
//! Copies one source article into a target journal:
//! 1. Find an earlier copy through its `pubid` identifier (update mode)
//! 2. Copy scalar fields, resolving section and licence by natural key
//! 3. Persist the copy
//! 4. Resolve the primary issue in the target journal
//! 5. Link shared relations and deep-copy owned ones
//! 6. Copy files, images and galleys
//! 7. Ensure the `pubid` identifier and, in update mode, mint a DOI

use crate::doi;
use crate::errors::ReplicationError;
use crate::files::{FileCopier, OwnedFile};
use crate::options::{ReplicationOptions, ReplicationOutcome};
use pressforge_common::db::models::*;
use pressforge_common::db::{ArticleFileCategory, DbPool, Repository};
use pressforge_common::errors::AppError;
use pressforge_common::storage::FileStore;
use sea_orm::{ConnectionTrait, NotSet, Set, TransactionTrait};
use tracing::{debug, error, info, instrument, warn};

/// Copies articles between journals
pub struct Replicator {
    pool: DbPool,
    store: FileStore,
    press_base_url: String,
}

/// Copy state of the article row before files are attached
struct Shell {
    article: Article,
    created: bool,
}

impl Replicator {
    pub fn new(pool: DbPool, store: FileStore, press_base_url: impl Into<String>) -> Self {
        Self {
            pool,
            store,
            press_base_url: press_base_url.into(),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Copy `source` into `target`, all-or-nothing.
    ///
    /// Database writes happen in one transaction. If any step fails the
    /// transaction is rolled back and payloads written during the attempt are
    /// removed again.
    #[instrument(skip(self, source, target, options), fields(source_id = source.id, target = %target.code))]
    pub async fn replicate(
        &self,
        source: &Article,
        target: &Journal,
        options: &ReplicationOptions,
    ) -> Result<ReplicationOutcome, ReplicationError> {
        options.validate()?;

        let txn = self.pool.connection().begin().await?;
        let mut copier = FileCopier::new(&self.store);

        let result = self
            .replicate_in(Repository::new(&txn), &mut copier, source, target, options)
            .await;

        match result {
            Ok(outcome) => match txn.commit().await {
                Ok(()) => {
                    info!(
                        target_id = outcome.target_id,
                        created = outcome.created,
                        warnings = outcome.warnings.len(),
                        "Article copied"
                    );
                    Ok(outcome)
                }
                Err(e) => {
                    error!(error = %e, "Commit failed, removing copied payloads");
                    copier.discard().await;
                    Err(e.into())
                }
            },
            Err(e) => {
                error!(error = %e, "Copy failed, rolling back");
                if let Err(rollback) = txn.rollback().await {
                    error!(error = %rollback, "Rollback failed");
                }
                copier.discard().await;
                Err(e)
            }
        }
    }

    async fn replicate_in<C: ConnectionTrait>(
        &self,
        repo: Repository<'_, C>,
        copier: &mut FileCopier<'_>,
        source: &Article,
        target: &Journal,
        options: &ReplicationOptions,
    ) -> Result<ReplicationOutcome, ReplicationError> {
        let mut warnings = Vec::new();

        let existing = if options.update_existing {
            repo.find_article_by_identifier(target.id, PUBID, &source.id.to_string())
                .await?
        } else {
            None
        };
        if let Some(ref copy) = existing {
            debug!(target_id = copy.id, "Updating earlier copy");
        }

        let hinted = match &options.target_language {
            Some(lang) => repo.find_translation(source.id, lang).await?,
            None => None,
        };

        let Shell { article, created } = self
            .persist_shell(repo, source, target, existing, hinted.as_ref())
            .await?;
        let article_id = article.id;

        self.copy_translations(repo, source, target, article_id, created, hinted.as_ref())
            .await?;

        let primary_issue_id = match source.primary_issue_id {
            Some(issue_id) => Some(self.resolve_issue(repo, issue_id, target, article_id).await?),
            None => None,
        };
        if !created {
            let dropped = repo
                .remove_issue_articles_except(article_id, primary_issue_id)
                .await?;
            debug!(dropped, "Removed stale issue memberships of earlier copy");
        }

        self.link_relations(repo, source, article_id, created).await?;

        if !created {
            let purged = repo.purge_owned_files(article_id).await?;
            debug!(purged, "Removed files of earlier copy");
        }

        for category in ArticleFileCategory::ALL {
            for file in repo.article_files(source.id, category).await? {
                let copy = copier.copy(repo, &OwnedFile::Plain(file), article_id).await?;
                repo.add_article_file(article_id, copy.file().id, category).await?;
            }
        }

        for wrapper in repo.supplementary_files(source.id).await? {
            let inner = find_file(repo, wrapper.file_id).await?;
            let copy = copier
                .copy(repo, &OwnedFile::Supplementary { wrapper, inner }, article_id)
                .await?;
            if let Some(wrapper) = copy.wrapper() {
                repo.add_article_supplementary_file(article_id, wrapper.id).await?;
            }
        }

        let large_image_file_id = self
            .copy_optional_file(repo, copier, source.large_image_file_id, article_id)
            .await?;
        let thumbnail_image_file_id = self
            .copy_optional_file(repo, copier, source.thumbnail_image_file_id, article_id)
            .await?;

        self.copy_galleys(repo, copier, source, article_id, options.target_language.as_deref())
            .await?;

        let mut row: ArticleActiveModel = article.into();
        row.primary_issue_id = Set(primary_issue_id);
        row.large_image_file_id = Set(large_image_file_id);
        row.thumbnail_image_file_id = Set(thumbnail_image_file_id);
        let article = repo.update_article(row).await?;

        repo.get_or_create_identifier(article_id, PUBID, &source.id.to_string())
            .await?;

        let doi = if options.update_existing {
            self.mint_doi(repo, &article, target, &mut warnings).await?
        } else {
            None
        };

        warnings.extend(copier.take_warnings());

        Ok(ReplicationOutcome {
            source_id: source.id,
            target_id: article_id,
            created,
            url: target.article_url(&self.press_base_url, article_id),
            doi,
            warnings,
        })
    }

    /// Insert a new copy or overwrite the scalars of an earlier one
    async fn persist_shell<C: ConnectionTrait>(
        &self,
        repo: Repository<'_, C>,
        source: &Article,
        target: &Journal,
        existing: Option<Article>,
        hinted: Option<&ArticleTranslation>,
    ) -> Result<Shell, ReplicationError> {
        let section_id = match source.section_id {
            Some(id) => {
                let section = repo
                    .find_section(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Section", id))?;
                let (section, _) = repo
                    .get_or_create_section(target.id, &section.name, section.sequence)
                    .await?;
                Some(section.id)
            }
            None => None,
        };

        let license_id = match source.license_id {
            Some(id) => {
                let licence = repo
                    .find_licence(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Licence", id))?;
                let (licence, _) = repo
                    .get_or_create_licence(target.id, &licence.short_name, &licence.name, &licence.url)
                    .await?;
                Some(licence.id)
            }
            None => None,
        };

        let title = hinted
            .map(|t| t.title.clone())
            .unwrap_or_else(|| source.title.clone());

        let shell = match existing {
            Some(article) => {
                let mut row: ArticleActiveModel = article.into();
                apply_scalars(&mut row, source, title);
                row.section_id = Set(section_id);
                row.license_id = Set(license_id);
                // Image files of the earlier copy are about to be purged
                row.large_image_file_id = Set(None);
                row.thumbnail_image_file_id = Set(None);
                Shell {
                    article: repo.update_article(row).await?,
                    created: false,
                }
            }
            None => {
                let mut row = ArticleActiveModel {
                    id: NotSet,
                    journal_id: Set(target.id),
                    is_import: Set(true),
                    section_id: Set(section_id),
                    license_id: Set(license_id),
                    primary_issue_id: Set(None),
                    large_image_file_id: Set(None),
                    thumbnail_image_file_id: Set(None),
                    ..Default::default()
                };
                apply_scalars(&mut row, source, title);
                Shell {
                    article: repo.insert_article(row).await?,
                    created: true,
                }
            }
        };

        Ok(shell)
    }

    async fn copy_translations<C: ConnectionTrait>(
        &self,
        repo: Repository<'_, C>,
        source: &Article,
        target: &Journal,
        article_id: i32,
        created: bool,
        hinted: Option<&ArticleTranslation>,
    ) -> Result<(), ReplicationError> {
        if !created {
            repo.delete_translations(article_id).await?;
        }
        for translation in repo.list_translations(source.id).await? {
            repo.upsert_translation(
                article_id,
                &translation.language,
                translation.title,
                translation.abstract_text,
            )
            .await?;
        }

        if let Some(hinted) = hinted {
            let abstract_text = match repo.find_translation(article_id, &target.default_language).await? {
                Some(current) => current.abstract_text,
                None => source.abstract_text.clone(),
            };
            repo.upsert_translation(
                article_id,
                &target.default_language,
                hinted.title.clone(),
                abstract_text,
            )
            .await?;
        }

        Ok(())
    }

    /// Get-or-create the issue type and issue in the target journal and add
    /// the copy to the issue
    async fn resolve_issue<C: ConnectionTrait>(
        &self,
        repo: Repository<'_, C>,
        issue_id: i32,
        target: &Journal,
        article_id: i32,
    ) -> Result<i32, ReplicationError> {
        let issue = repo
            .find_issue(issue_id)
            .await?
            .ok_or_else(|| AppError::not_found("Issue", issue_id))?;
        let issue_type = repo
            .find_issue_type(issue.issue_type_id)
            .await?
            .ok_or_else(|| AppError::not_found("IssueType", issue.issue_type_id))?;

        let (target_type, type_created) = repo
            .get_or_create_issue_type(
                target.id,
                &issue_type.code,
                &issue_type.pretty_name,
                issue_type.custom_plural.clone(),
            )
            .await?;
        let (target_issue, issue_created) = repo
            .get_or_create_issue(
                target.id,
                issue.volume,
                &issue.issue,
                target_type.id,
                issue.date,
                &issue.issue_title,
            )
            .await?;
        repo.add_issue_article(target_issue.id, article_id).await?;

        debug!(
            issue_id = target_issue.id,
            type_created,
            issue_created,
            "Resolved primary issue"
        );
        Ok(target_issue.id)
    }

    /// Shared relations by reference, frozen authors by value
    async fn link_relations<C: ConnectionTrait>(
        &self,
        repo: Repository<'_, C>,
        source: &Article,
        article_id: i32,
        created: bool,
    ) -> Result<(), ReplicationError> {
        let authors = repo.article_author_ids(source.id).await?;
        repo.set_article_authors(article_id, &authors).await?;

        let notes = repo.article_publisher_note_ids(source.id).await?;
        repo.set_article_publisher_notes(article_id, &notes).await?;

        repo.clear_article_keywords(article_id).await?;
        for keyword_id in repo.article_keyword_ids(source.id).await? {
            repo.add_article_keyword(article_id, keyword_id).await?;
        }

        if !created {
            repo.delete_frozen_authors(article_id).await?;
        }
        for frozen in repo.list_frozen_authors(source.id).await? {
            repo.clone_frozen_author(&frozen, article_id).await?;
        }

        Ok(())
    }

    async fn copy_optional_file<C: ConnectionTrait>(
        &self,
        repo: Repository<'_, C>,
        copier: &mut FileCopier<'_>,
        file_id: Option<i32>,
        article_id: i32,
    ) -> Result<Option<i32>, ReplicationError> {
        let Some(file_id) = file_id else {
            return Ok(None);
        };
        let file = find_file(repo, file_id).await?;
        let copy = copier.copy(repo, &OwnedFile::Plain(file), article_id).await?;
        Ok(Some(copy.file().id))
    }

    async fn copy_galleys<C: ConnectionTrait>(
        &self,
        repo: Repository<'_, C>,
        copier: &mut FileCopier<'_>,
        source: &Article,
        article_id: i32,
        language: Option<&str>,
    ) -> Result<(), ReplicationError> {
        for galley in repo.list_galleys(source.id).await? {
            if let Some(lang) = language {
                if !galley.matches_language(lang) {
                    debug!(galley_id = galley.id, label = %galley.label, "Skipping galley in another language");
                    continue;
                }
            }

            let file_id = self
                .copy_optional_file(repo, copier, galley.file_id, article_id)
                .await?;
            let css_file_id = self
                .copy_optional_file(repo, copier, galley.css_file_id, article_id)
                .await?;
            let copy = repo
                .clone_galley(&galley, article_id, file_id, css_file_id)
                .await?;

            for image in repo.galley_images(galley.id).await? {
                let image_copy = copier.copy(repo, &OwnedFile::Plain(image), article_id).await?;
                repo.add_galley_image(copy.id, image_copy.file().id).await?;
            }
        }

        Ok(())
    }

    async fn mint_doi<C: ConnectionTrait>(
        &self,
        repo: Repository<'_, C>,
        article: &Article,
        target: &Journal,
        warnings: &mut Vec<String>,
    ) -> Result<Option<String>, ReplicationError> {
        let prefix = repo
            .get_setting_value(doi::SETTING_GROUP, doi::PREFIX_SETTING, Some(target.id))
            .await?
            .unwrap_or_default();
        let pattern = repo
            .get_setting_value(doi::SETTING_GROUP, doi::PATTERN_SETTING, Some(target.id))
            .await?
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| doi::DEFAULT_DOI_PATTERN.to_string());

        let suffix = doi::render_suffix(&pattern, article, target)?;
        let Some(value) = doi::assemble(&prefix, &suffix) else {
            let message = format!(
                "Journal {} has no DOI prefix or an empty DOI suffix; no DOI minted for article {}",
                target.code, article.id
            );
            warn!(journal = %target.code, article_id = article.id, "DOI not minted");
            warnings.push(message);
            return Ok(None);
        };

        repo.set_identifier(article.id, DOI, &value).await?;
        Ok(Some(value))
    }
}

async fn find_file<C: ConnectionTrait>(
    repo: Repository<'_, C>,
    file_id: i32,
) -> Result<File, ReplicationError> {
    repo.find_file(file_id)
        .await?
        .ok_or_else(|| AppError::not_found("File", file_id).into())
}

/// Copy every plain scalar of `source` onto `row`
fn apply_scalars(row: &mut ArticleActiveModel, source: &Article, title: String) {
    row.title = Set(title);
    row.subtitle = Set(source.subtitle.clone());
    row.abstract_text = Set(source.abstract_text.clone());
    row.language = Set(source.language.clone());
    row.stage = Set(source.stage.clone());
    row.date_submitted = Set(source.date_submitted);
    row.date_accepted = Set(source.date_accepted);
    row.date_published = Set(source.date_published);
    row.date_declined = Set(source.date_declined);
    row.page_numbers = Set(source.page_numbers.clone());
    row.first_page = Set(source.first_page);
    row.last_page = Set(source.last_page);
    row.total_pages = Set(source.total_pages);
    row.article_number = Set(source.article_number.clone());
    row.peer_reviewed = Set(source.peer_reviewed);
    row.is_remote = Set(source.is_remote);
    row.remote_url = Set(source.remote_url.clone());
    row.competing_interests = Set(source.competing_interests.clone());
    row.custom_how_to_cite = Set(source.custom_how_to_cite.clone());
}
