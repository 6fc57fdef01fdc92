use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // Journal Operations
    // ========================================================================

    /// Find journal by ID
    pub async fn find_journal(&self, id: i32) -> Result<Option<Journal>> {
        JournalEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Find journal by its short code
    pub async fn find_journal_by_code(&self, code: &str) -> Result<Option<Journal>> {
        JournalEntity::find()
            .filter(JournalColumn::Code.eq(code))
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// All journals in creation order
    pub async fn list_journals(&self) -> Result<Vec<Journal>> {
        JournalEntity::find()
            .order_by_asc(JournalColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Journals whose code is in `codes`; unknown codes are ignored
    pub async fn find_journals_by_codes(&self, codes: &[String]) -> Result<Vec<Journal>> {
        JournalEntity::find()
            .filter(JournalColumn::Code.is_in(codes.iter().map(String::as_str)))
            .order_by_asc(JournalColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }
}
