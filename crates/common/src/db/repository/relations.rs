use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // Shared Relations (authors, keywords, publisher notes)
    //
    // These rows are shared between articles; only the link rows are
    // written, never the related rows themselves.
    // ========================================================================

    /// Author account IDs of an article, in link order
    pub async fn article_author_ids(&self, article_id: i32) -> Result<Vec<i32>> {
        Ok(ArticleAuthorEntity::find()
            .filter(ArticleAuthorColumn::ArticleId.eq(article_id))
            .order_by_asc(ArticleAuthorColumn::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.account_id)
            .collect())
    }

    /// Replace an article's author set
    pub async fn set_article_authors(&self, article_id: i32, account_ids: &[i32]) -> Result<()> {
        ArticleAuthorEntity::delete_many()
            .filter(ArticleAuthorColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;

        for account_id in account_ids {
            ArticleAuthorActiveModel {
                id: NotSet,
                article_id: Set(article_id),
                account_id: Set(*account_id),
            }
            .insert(self.conn)
            .await?;
        }

        Ok(())
    }

    /// Publisher note IDs of an article, in link order
    pub async fn article_publisher_note_ids(&self, article_id: i32) -> Result<Vec<i32>> {
        Ok(ArticlePublisherNoteEntity::find()
            .filter(ArticlePublisherNoteColumn::ArticleId.eq(article_id))
            .order_by_asc(ArticlePublisherNoteColumn::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.publisher_note_id)
            .collect())
    }

    /// Replace an article's publisher note set
    pub async fn set_article_publisher_notes(
        &self,
        article_id: i32,
        note_ids: &[i32],
    ) -> Result<()> {
        ArticlePublisherNoteEntity::delete_many()
            .filter(ArticlePublisherNoteColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;

        for note_id in note_ids {
            ArticlePublisherNoteActiveModel {
                id: NotSet,
                article_id: Set(article_id),
                publisher_note_id: Set(*note_id),
            }
            .insert(self.conn)
            .await?;
        }

        Ok(())
    }

    /// Keyword IDs of an article, in link order
    pub async fn article_keyword_ids(&self, article_id: i32) -> Result<Vec<i32>> {
        Ok(ArticleKeywordEntity::find()
            .filter(ArticleKeywordColumn::ArticleId.eq(article_id))
            .order_by_asc(ArticleKeywordColumn::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.keyword_id)
            .collect())
    }

    /// Remove every keyword link of an article
    pub async fn clear_article_keywords(&self, article_id: i32) -> Result<u64> {
        let result = ArticleKeywordEntity::delete_many()
            .filter(ArticleKeywordColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn add_article_keyword(&self, article_id: i32, keyword_id: i32) -> Result<()> {
        ArticleKeywordActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            keyword_id: Set(keyword_id),
        }
        .insert(self.conn)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Owned Relations (frozen authors, translations)
    // ========================================================================

    pub async fn list_frozen_authors(&self, article_id: i32) -> Result<Vec<FrozenAuthor>> {
        FrozenAuthorEntity::find()
            .filter(FrozenAuthorColumn::ArticleId.eq(article_id))
            .order_by_asc(FrozenAuthorColumn::Order)
            .order_by_asc(FrozenAuthorColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Insert a copy of `frozen` owned by `article_id`
    pub async fn clone_frozen_author(
        &self,
        frozen: &FrozenAuthor,
        article_id: i32,
    ) -> Result<FrozenAuthor> {
        FrozenAuthorActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            author_id: Set(frozen.author_id),
            first_name: Set(frozen.first_name.clone()),
            middle_name: Set(frozen.middle_name.clone()),
            last_name: Set(frozen.last_name.clone()),
            institution: Set(frozen.institution.clone()),
            department: Set(frozen.department.clone()),
            frozen_email: Set(frozen.frozen_email.clone()),
            order: Set(frozen.order),
        }
        .insert(self.conn)
        .await
        .map_err(Into::into)
    }

    pub async fn delete_frozen_authors(&self, article_id: i32) -> Result<u64> {
        let result = FrozenAuthorEntity::delete_many()
            .filter(FrozenAuthorColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_translations(&self, article_id: i32) -> Result<u64> {
        let result = ArticleTranslationEntity::delete_many()
            .filter(ArticleTranslationColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn list_translations(&self, article_id: i32) -> Result<Vec<ArticleTranslation>> {
        ArticleTranslationEntity::find()
            .filter(ArticleTranslationColumn::ArticleId.eq(article_id))
            .order_by_asc(ArticleTranslationColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_translation(
        &self,
        article_id: i32,
        language: &str,
    ) -> Result<Option<ArticleTranslation>> {
        ArticleTranslationEntity::find()
            .filter(ArticleTranslationColumn::ArticleId.eq(article_id))
            .filter(ArticleTranslationColumn::Language.eq(language))
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Set the title / abstract of one language, creating the row if needed
    pub async fn upsert_translation(
        &self,
        article_id: i32,
        language: &str,
        title: String,
        abstract_text: Option<String>,
    ) -> Result<ArticleTranslation> {
        match self.find_translation(article_id, language).await? {
            Some(existing) => {
                let mut row: ArticleTranslationActiveModel = existing.into();
                row.title = Set(title);
                row.abstract_text = Set(abstract_text);
                row.update(self.conn).await.map_err(Into::into)
            }
            None => ArticleTranslationActiveModel {
                id: NotSet,
                article_id: Set(article_id),
                language: Set(language.to_string()),
                title: Set(title),
                abstract_text: Set(abstract_text),
            }
            .insert(self.conn)
            .await
            .map_err(Into::into),
        }
    }
}
