//! Owned file copies
//!
//! A copied file gets a fresh record bound to the new article and, when the
//! source is stored under an article, its payload is copied to the matching
//! path under the new article. A missing source payload is recorded as a
//! warning and the new record is kept.

use crate::errors::ReplicationError;
use pressforge_common::db::models::{File, SupplementaryFile};
use pressforge_common::db::Repository;
use pressforge_common::storage::FileStore;
use sea_orm::ConnectionTrait;
use std::path::PathBuf;
use tracing::{debug, warn};

/// The closed set of file shapes an article owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedFile {
    Plain(File),
    /// Descriptive wrapper around an inner file that carries the payload
    Supplementary {
        wrapper: SupplementaryFile,
        inner: File,
    },
}

impl OwnedFile {
    /// The record whose payload lives in storage
    pub fn file(&self) -> &File {
        match self {
            OwnedFile::Plain(file) => file,
            OwnedFile::Supplementary { inner, .. } => inner,
        }
    }

    /// Descriptive wrapper, for supplementary files only
    pub fn wrapper(&self) -> Option<&SupplementaryFile> {
        match self {
            OwnedFile::Plain(_) => None,
            OwnedFile::Supplementary { wrapper, .. } => Some(wrapper),
        }
    }
}

/// Copies files for one replication attempt and remembers which payloads
/// it created so a failed attempt can remove them
pub(crate) struct FileCopier<'s> {
    store: &'s FileStore,
    created: Vec<PathBuf>,
    warnings: Vec<String>,
}

impl<'s> FileCopier<'s> {
    pub fn new(store: &'s FileStore) -> Self {
        Self {
            store,
            created: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Copy a plain or supplementary file to `article_id`
    pub async fn copy<C: ConnectionTrait>(
        &mut self,
        repo: Repository<'_, C>,
        source: &OwnedFile,
        article_id: i32,
    ) -> Result<OwnedFile, ReplicationError> {
        match source {
            OwnedFile::Plain(file) => Ok(OwnedFile::Plain(
                self.copy_file(repo, file, article_id).await?,
            )),
            OwnedFile::Supplementary { inner, .. } => {
                let inner = self.copy_file(repo, inner, article_id).await?;
                let wrapper = repo.insert_supplementary_file(inner.id, "").await?;
                Ok(OwnedFile::Supplementary { wrapper, inner })
            }
        }
    }

    /// Copy a single file record and its payload to `article_id`
    async fn copy_file<C: ConnectionTrait>(
        &mut self,
        repo: Repository<'_, C>,
        file: &File,
        article_id: i32,
    ) -> Result<File, ReplicationError> {
        let copy = repo.clone_file(file, article_id).await?;

        let Some(source_path) = self.store.self_article_path(file) else {
            debug!(file_id = file.id, "File has no article storage path, record only");
            return Ok(copy);
        };
        let target_path = self.store.file_path(&copy, article_id);

        match self.store.copy(&source_path, &target_path).await {
            Ok(copied) => {
                if copied.created {
                    self.created.push(copied.path);
                }
            }
            Err(e) if e.is_missing_payload() => {
                let message = format!(
                    "File {} has no payload at {}; record copied without it",
                    file.id,
                    source_path.display()
                );
                warn!(file_id = file.id, path = %source_path.display(), "Source payload missing");
                self.warnings.push(message);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(copy)
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Remove every payload this copier created; best effort
    pub async fn discard(&mut self) {
        for path in self.created.drain(..) {
            if let Err(e) = self.store.remove(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove payload of rolled back copy");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressforge_common::db::models::FileEntity;
    use pressforge_common::testing::{count, memory_pool, Seed};

    #[tokio::test]
    async fn test_supplementary_copy_empties_description() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let pool = memory_pool().await;
        let seed = Seed::new(&pool);

        let journal = seed.journal("olh").await;
        let source = seed.article(journal.id, "Source").await;
        let target = seed.article(journal.id, "Target").await;
        let inner = seed.file(Some(source.id), "data.csv", "text/csv").await;
        let wrapper = seed.supplementary_file(source.id, inner.id, "Raw data").await;
        store
            .write(&store.file_path(&inner, source.id), b"a,b\n1,2\n")
            .await
            .unwrap();

        let mut copier = FileCopier::new(&store);
        let copied = copier
            .copy(
                pool.repository(),
                &OwnedFile::Supplementary { wrapper, inner: inner.clone() },
                target.id,
            )
            .await
            .unwrap();

        let payload_id = copied.file().id;
        let OwnedFile::Supplementary { wrapper, inner: new_inner } = copied else {
            panic!("expected a supplementary copy");
        };
        assert_eq!(wrapper.description, "");
        assert_eq!(wrapper.file_id, new_inner.id);
        assert_eq!(payload_id, new_inner.id);
        assert_ne!(new_inner.id, inner.id);
        assert_eq!(new_inner.article_id, Some(target.id));
        assert_eq!(
            store.read(&store.file_path(&new_inner, target.id)).await.unwrap(),
            b"a,b\n1,2\n"
        );
        assert!(copier.take_warnings().is_empty());
    }

    #[tokio::test]
    async fn test_missing_payload_warns_and_keeps_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let pool = memory_pool().await;
        let seed = Seed::new(&pool);

        let journal = seed.journal("olh").await;
        let source = seed.article(journal.id, "Source").await;
        let target = seed.article(journal.id, "Target").await;
        let file = seed.file(Some(source.id), "gone.pdf", "application/pdf").await;

        let mut copier = FileCopier::new(&store);
        let copy = copier
            .copy(pool.repository(), &OwnedFile::Plain(file), target.id)
            .await
            .unwrap();

        assert!(copy.wrapper().is_none());
        assert_eq!(copy.file().article_id, Some(target.id));
        assert_eq!(count(pool.connection(), FileEntity).await, 2);
        let warnings = copier.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("gone.pdf"));
    }

    #[tokio::test]
    async fn test_discard_removes_created_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let pool = memory_pool().await;
        let seed = Seed::new(&pool);

        let journal = seed.journal("olh").await;
        let source = seed.article(journal.id, "Source").await;
        let file = seed.file(Some(source.id), "fig.png", "image/png").await;
        store.write(&store.file_path(&file, source.id), b"png").await.unwrap();

        let mut copier = FileCopier::new(&store);
        let copy = copier
            .copy(pool.repository(), &OwnedFile::Plain(file.clone()), 99)
            .await
            .unwrap();
        let target_path = store.file_path(copy.file(), 99);
        assert!(target_path.exists());

        copier.discard().await;
        assert!(!target_path.exists());
        assert!(store.file_path(&file, source.id).exists());
    }
}
