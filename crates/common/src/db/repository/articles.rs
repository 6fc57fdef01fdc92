use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // Article Operations
    // ========================================================================

    /// Find article by ID
    pub async fn find_article(&self, id: i32) -> Result<Option<Article>> {
        ArticleEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Find article by ID, only if it belongs to `journal_id`
    pub async fn find_article_in_journal(
        &self,
        journal_id: i32,
        id: i32,
    ) -> Result<Option<Article>> {
        ArticleEntity::find_by_id(id)
            .filter(ArticleColumn::JournalId.eq(journal_id))
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// All articles of a journal
    pub async fn list_articles_in_journal(&self, journal_id: i32) -> Result<Vec<Article>> {
        ArticleEntity::find()
            .filter(ArticleColumn::JournalId.eq(journal_id))
            .order_by_asc(ArticleColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Articles of a journal whose primary issue is `issue_id`
    pub async fn list_articles_by_primary_issue(
        &self,
        journal_id: i32,
        issue_id: i32,
    ) -> Result<Vec<Article>> {
        ArticleEntity::find()
            .filter(ArticleColumn::JournalId.eq(journal_id))
            .filter(ArticleColumn::PrimaryIssueId.eq(issue_id))
            .order_by_asc(ArticleColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Articles that are members of an issue (not only primary ones)
    pub async fn list_issue_articles(&self, issue_id: i32) -> Result<Vec<Article>> {
        let article_ids: Vec<i32> = IssueArticleEntity::find()
            .filter(IssueArticleColumn::IssueId.eq(issue_id))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.article_id)
            .collect();

        ArticleEntity::find()
            .filter(ArticleColumn::Id.is_in(article_ids))
            .order_by_asc(ArticleColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Find the article in `journal_id` carrying identifier `(id_type, value)`
    pub async fn find_article_by_identifier(
        &self,
        journal_id: i32,
        id_type: &str,
        value: &str,
    ) -> Result<Option<Article>> {
        let article_ids: Vec<i32> = IdentifierEntity::find()
            .filter(IdentifierColumn::IdType.eq(id_type))
            .filter(IdentifierColumn::Identifier.eq(value))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.article_id)
            .collect();

        ArticleEntity::find()
            .filter(ArticleColumn::Id.is_in(article_ids))
            .filter(ArticleColumn::JournalId.eq(journal_id))
            .order_by_asc(ArticleColumn::Id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Insert a new article
    pub async fn insert_article(&self, article: ArticleActiveModel) -> Result<Article> {
        article.insert(self.conn).await.map_err(Into::into)
    }

    /// Write the set fields of an existing article
    pub async fn update_article(&self, article: ArticleActiveModel) -> Result<Article> {
        article.update(self.conn).await.map_err(Into::into)
    }

    /// Replace an article's title
    pub async fn update_article_title(&self, article: Article, title: String) -> Result<Article> {
        let mut article: ArticleActiveModel = article.into();
        article.title = Set(title);
        article.update(self.conn).await.map_err(Into::into)
    }

    /// Replace an article's abstract
    pub async fn update_article_abstract(
        &self,
        article: Article,
        abstract_text: String,
    ) -> Result<Article> {
        let mut article: ArticleActiveModel = article.into();
        article.abstract_text = Set(Some(abstract_text));
        article.update(self.conn).await.map_err(Into::into)
    }
}
