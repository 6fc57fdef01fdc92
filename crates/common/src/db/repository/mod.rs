//! Repository pattern for database operations
//!
//! A `Repository` borrows any sea-orm connection, so the same queries run
//! in autocommit mode on the pool or inside a `DatabaseTransaction` when a
//! unit of work has to be all-or-nothing.

mod accounts;
mod articles;
mod files;
mod identifiers;
mod journals;
mod reference;
mod relations;
mod reviews;
mod settings;

pub use accounts::NewAccount;
pub use files::ArticleFileCategory;

use sea_orm::ConnectionTrait;

/// Repository for data access operations
pub struct Repository<'c, C> {
    conn: &'c C,
}

impl<C> Clone for Repository<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Repository<'_, C> {}

impl<'c, C: ConnectionTrait> Repository<'c, C> {
    /// Create a new repository on the given connection or transaction
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Get the underlying connection
    pub fn conn(&self) -> &'c C {
        self.conn
    }
}
