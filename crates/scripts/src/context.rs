//! Shared state handed to every command

use pressforge_common::config::AppConfig;
use pressforge_common::db::{DbPool, Repository};
use pressforge_common::storage::FileStore;
use sea_orm::DatabaseConnection;

pub struct Context {
    pub config: AppConfig,
    pub pool: DbPool,
}

impl Context {
    pub fn new(config: AppConfig, pool: DbPool) -> Self {
        Self { config, pool }
    }

    pub fn repository(&self) -> Repository<'_, DatabaseConnection> {
        self.pool.repository()
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.config.storage.files_root.clone())
    }
}
