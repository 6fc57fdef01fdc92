use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // Journal-scoped Reference Data
    //
    // Every `get_or_create_*` returns `(row, created)`; the natural key is the
    // only lookup criterion, the remaining arguments are creation defaults.
    // ========================================================================

    pub async fn find_section(&self, id: i32) -> Result<Option<Section>> {
        SectionEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Section keyed by `name` within `journal_id`
    pub async fn get_or_create_section(
        &self,
        journal_id: i32,
        name: &str,
        sequence: i32,
    ) -> Result<(Section, bool)> {
        let existing = SectionEntity::find()
            .filter(SectionColumn::JournalId.eq(journal_id))
            .filter(SectionColumn::Name.eq(name))
            .one(self.conn)
            .await?;

        if let Some(section) = existing {
            return Ok((section, false));
        }

        let section = SectionActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            name: Set(name.to_string()),
            sequence: Set(sequence),
        }
        .insert(self.conn)
        .await?;

        Ok((section, true))
    }

    pub async fn find_licence(&self, id: i32) -> Result<Option<Licence>> {
        LicenceEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Licence keyed by `short_name` within `journal_id`
    pub async fn get_or_create_licence(
        &self,
        journal_id: i32,
        short_name: &str,
        name: &str,
        url: &str,
    ) -> Result<(Licence, bool)> {
        let existing = LicenceEntity::find()
            .filter(LicenceColumn::JournalId.eq(journal_id))
            .filter(LicenceColumn::ShortName.eq(short_name))
            .one(self.conn)
            .await?;

        if let Some(licence) = existing {
            return Ok((licence, false));
        }

        let licence = LicenceActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            short_name: Set(short_name.to_string()),
            name: Set(name.to_string()),
            url: Set(url.to_string()),
        }
        .insert(self.conn)
        .await?;

        Ok((licence, true))
    }

    /// Find issue by ID
    pub async fn find_issue(&self, id: i32) -> Result<Option<Issue>> {
        IssueEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_issue_type(&self, id: i32) -> Result<Option<IssueType>> {
        IssueTypeEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Issue type keyed by `code` within `journal_id`
    pub async fn get_or_create_issue_type(
        &self,
        journal_id: i32,
        code: &str,
        pretty_name: &str,
        custom_plural: Option<String>,
    ) -> Result<(IssueType, bool)> {
        let existing = IssueTypeEntity::find()
            .filter(IssueTypeColumn::JournalId.eq(journal_id))
            .filter(IssueTypeColumn::Code.eq(code))
            .one(self.conn)
            .await?;

        if let Some(issue_type) = existing {
            return Ok((issue_type, false));
        }

        let issue_type = IssueTypeActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            code: Set(code.to_string()),
            pretty_name: Set(pretty_name.to_string()),
            custom_plural: Set(custom_plural),
        }
        .insert(self.conn)
        .await?;

        Ok((issue_type, true))
    }

    /// Issue keyed by `(volume, issue, issue_type_id)` within `journal_id`
    pub async fn get_or_create_issue(
        &self,
        journal_id: i32,
        volume: i32,
        issue: &str,
        issue_type_id: i32,
        date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
        issue_title: &str,
    ) -> Result<(Issue, bool)> {
        let existing = IssueEntity::find()
            .filter(IssueColumn::JournalId.eq(journal_id))
            .filter(IssueColumn::Volume.eq(volume))
            .filter(IssueColumn::Issue.eq(issue))
            .filter(IssueColumn::IssueTypeId.eq(issue_type_id))
            .one(self.conn)
            .await?;

        if let Some(found) = existing {
            return Ok((found, false));
        }

        let created = IssueActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            volume: Set(volume),
            issue: Set(issue.to_string()),
            issue_type_id: Set(issue_type_id),
            date: Set(date),
            issue_title: Set(issue_title.to_string()),
        }
        .insert(self.conn)
        .await?;

        Ok((created, true))
    }

    /// Add an article to an issue's membership; returns false if already there
    pub async fn add_issue_article(&self, issue_id: i32, article_id: i32) -> Result<bool> {
        let existing = IssueArticleEntity::find()
            .filter(IssueArticleColumn::IssueId.eq(issue_id))
            .filter(IssueArticleColumn::ArticleId.eq(article_id))
            .one(self.conn)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        IssueArticleActiveModel {
            id: NotSet,
            issue_id: Set(issue_id),
            article_id: Set(article_id),
        }
        .insert(self.conn)
        .await?;

        Ok(true)
    }

    /// Drop an article's issue memberships other than `keep`; all of them
    /// when `keep` is `None`
    pub async fn remove_issue_articles_except(
        &self,
        article_id: i32,
        keep: Option<i32>,
    ) -> Result<u64> {
        let mut query = IssueArticleEntity::delete_many()
            .filter(IssueArticleColumn::ArticleId.eq(article_id));
        if let Some(issue_id) = keep {
            query = query.filter(IssueArticleColumn::IssueId.ne(issue_id));
        }

        Ok(query.exec(self.conn).await?.rows_affected)
    }

    /// IDs of the issues an article is a member of
    pub async fn article_issue_ids(&self, article_id: i32) -> Result<Vec<i32>> {
        Ok(IssueArticleEntity::find()
            .filter(IssueArticleColumn::ArticleId.eq(article_id))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.issue_id)
            .collect())
    }
}
