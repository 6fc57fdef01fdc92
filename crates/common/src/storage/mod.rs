//! Article payload storage
//!
//! Payloads live at `<files_root>/articles/<article_id>/<uuid_filename>`.
//! Copies are streamed through a SHA-256 hasher on both ends so a copy is
//! only reported complete when the bytes match.

use crate::db::models::File;
use crate::errors::{AppError, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

const BUFFER_SIZE: usize = 64 * 1024;

/// Filesystem view of the platform's file store
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// Result of a verified payload copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedPayload {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
    /// False when the copy overwrote an existing payload
    pub created: bool,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every payload of an article
    pub fn article_dir(&self, article_id: i32) -> PathBuf {
        self.root.join("articles").join(article_id.to_string())
    }

    /// Path of `file` when stored under `article_id`
    pub fn file_path(&self, file: &File, article_id: i32) -> PathBuf {
        self.article_dir(article_id).join(&file.uuid_filename)
    }

    /// Path of `file` under its own article, if it is bound to one
    pub fn self_article_path(&self, file: &File) -> Option<PathBuf> {
        file.article_id.map(|article_id| self.file_path(file, article_id))
    }

    /// Read a whole payload
    pub async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).await.map_err(|e| AppError::storage(path, e))
    }

    /// Write a payload, creating intermediate directories
    pub async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::storage(parent, e))?;
        }
        fs::write(path, contents)
            .await
            .map_err(|e| AppError::storage(path, e))
    }

    /// Remove a payload; a payload that is already gone is not an error
    pub async fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(path, e)),
        }
    }

    /// Copy `source` to `target` byte-for-byte, creating intermediate
    /// directories, and verify the written bytes against the source digest.
    ///
    /// A missing source surfaces as a `Storage` error whose
    /// [`AppError::is_missing_payload`] is true, before anything is written.
    pub async fn copy(&self, source: &Path, target: &Path) -> Result<CopiedPayload> {
        let mut reader = fs::File::open(source)
            .await
            .map_err(|e| AppError::storage(source, e))?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::storage(parent, e))?;
        }

        let created = !fs::try_exists(target).await.unwrap_or(false);
        let mut writer = fs::File::create(target)
            .await
            .map_err(|e| AppError::storage(target, e))?;

        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut bytes = 0u64;
        loop {
            let n = reader
                .read(&mut buffer)
                .await
                .map_err(|e| AppError::storage(source, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
            writer
                .write_all(&buffer[..n])
                .await
                .map_err(|e| AppError::storage(target, e))?;
            bytes += n as u64;
        }
        writer
            .sync_all()
            .await
            .map_err(|e| AppError::storage(target, e))?;
        drop(writer);

        let expected = hex::encode(hasher.finalize());
        let actual = self.digest(target).await?;
        if actual != expected {
            return Err(AppError::ChecksumMismatch {
                path: target.to_path_buf(),
            });
        }

        debug!(
            source = %source.display(),
            target = %target.display(),
            bytes,
            "Payload copied"
        );

        Ok(CopiedPayload {
            path: target.to_path_buf(),
            bytes,
            sha256: expected,
            created,
        })
    }

    /// Hex SHA-256 of a stored payload
    pub async fn digest(&self, path: &Path) -> Result<String> {
        let mut reader = fs::File::open(path)
            .await
            .map_err(|e| AppError::storage(path, e))?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; BUFFER_SIZE];
        loop {
            let n = reader
                .read(&mut buffer)
                .await
                .map_err(|e| AppError::storage(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
        Ok(hex::encode(hasher.finalize()))
    }
}
