use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // Identifier Operations
    // ========================================================================

    pub async fn list_identifiers(&self, article_id: i32) -> Result<Vec<Identifier>> {
        IdentifierEntity::find()
            .filter(IdentifierColumn::ArticleId.eq(article_id))
            .order_by_asc(IdentifierColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// First identifier of a scheme on an article
    pub async fn find_identifier(
        &self,
        article_id: i32,
        id_type: &str,
    ) -> Result<Option<Identifier>> {
        IdentifierEntity::find()
            .filter(IdentifierColumn::ArticleId.eq(article_id))
            .filter(IdentifierColumn::IdType.eq(id_type))
            .order_by_asc(IdentifierColumn::Id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Identifier keyed by `(article, scheme, value)`; new rows are enabled
    pub async fn get_or_create_identifier(
        &self,
        article_id: i32,
        id_type: &str,
        value: &str,
    ) -> Result<(Identifier, bool)> {
        let existing = IdentifierEntity::find()
            .filter(IdentifierColumn::ArticleId.eq(article_id))
            .filter(IdentifierColumn::IdType.eq(id_type))
            .filter(IdentifierColumn::Identifier.eq(value))
            .one(self.conn)
            .await?;

        if let Some(identifier) = existing {
            return Ok((identifier, false));
        }

        let identifier = IdentifierActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            id_type: Set(id_type.to_string()),
            identifier: Set(value.to_string()),
            enabled: Set(true),
        }
        .insert(self.conn)
        .await?;

        Ok((identifier, true))
    }

    /// Make the article's single identifier of `id_type` hold `value`
    pub async fn set_identifier(
        &self,
        article_id: i32,
        id_type: &str,
        value: &str,
    ) -> Result<Identifier> {
        match self.find_identifier(article_id, id_type).await? {
            Some(existing) if existing.identifier == value => Ok(existing),
            Some(existing) => {
                let mut identifier: IdentifierActiveModel = existing.into();
                identifier.identifier = Set(value.to_string());
                identifier.update(self.conn).await.map_err(Into::into)
            }
            None => Ok(self.get_or_create_identifier(article_id, id_type, value).await?.0),
        }
    }
}
