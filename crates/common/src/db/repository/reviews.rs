use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // Review Operations
    // ========================================================================

    /// Review assignments on any article of a journal
    pub async fn review_assignments_for_journal(
        &self,
        journal_id: i32,
    ) -> Result<Vec<ReviewAssignment>> {
        let article_ids: Vec<i32> = self
            .list_articles_in_journal(journal_id)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        ReviewAssignmentEntity::find()
            .filter(ReviewAssignmentColumn::ArticleId.is_in(article_ids))
            .order_by_asc(ReviewAssignmentColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_review_assignment(&self, id: i32) -> Result<Option<ReviewAssignment>> {
        ReviewAssignmentEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Answers belonging to any of the given assignments
    pub async fn review_answers(&self, assignment_ids: &[i32]) -> Result<Vec<ReviewAnswer>> {
        ReviewAnswerEntity::find()
            .filter(ReviewAnswerColumn::AssignmentId.is_in(assignment_ids.iter().copied()))
            .order_by_asc(ReviewAnswerColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn review_form_elements(&self, ids: &[i32]) -> Result<Vec<ReviewFormElement>> {
        ReviewFormElementEntity::find()
            .filter(ReviewFormElementColumn::Id.is_in(ids.iter().copied()))
            .order_by_asc(ReviewFormElementColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Answers on assignments of a journal's articles that are still in a
    /// review stage, optionally narrowed to one article
    pub async fn review_answers_in_review_stages(
        &self,
        journal_id: i32,
        article_id: Option<i32>,
    ) -> Result<Vec<(ReviewAnswer, ReviewAssignment)>> {
        let mut articles = ArticleEntity::find()
            .filter(ArticleColumn::JournalId.eq(journal_id))
            .filter(ArticleColumn::Stage.is_in(stage::REVIEW_STAGES));
        if let Some(article_id) = article_id {
            articles = articles.filter(ArticleColumn::Id.eq(article_id));
        }
        let article_ids: Vec<i32> = articles
            .all(self.conn)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        let assignments = ReviewAssignmentEntity::find()
            .filter(ReviewAssignmentColumn::ArticleId.is_in(article_ids))
            .order_by_asc(ReviewAssignmentColumn::Id)
            .all(self.conn)
            .await?;
        let assignment_ids: Vec<i32> = assignments.iter().map(|a| a.id).collect();

        let answers = self.review_answers(&assignment_ids).await?;

        Ok(answers
            .into_iter()
            .filter_map(|answer| {
                assignments
                    .iter()
                    .find(|a| a.id == answer.assignment_id)
                    .cloned()
                    .map(|assignment| (answer, assignment))
            })
            .collect())
    }

    pub async fn update_review_answer(&self, answer: ReviewAnswer, text: String) -> Result<ReviewAnswer> {
        let mut answer: ReviewAnswerActiveModel = answer.into();
        answer.answer = Set(text);
        answer.update(self.conn).await.map_err(Into::into)
    }

    pub async fn set_comments_for_editor(
        &self,
        assignment: ReviewAssignment,
        comments: String,
    ) -> Result<ReviewAssignment> {
        let mut assignment: ReviewAssignmentActiveModel = assignment.into();
        assignment.comments_for_editor = Set(Some(comments));
        assignment.update(self.conn).await.map_err(Into::into)
    }
}
