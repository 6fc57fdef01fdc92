//! Reviewer answer to a review form element

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review_reviewassignmentanswer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub assignment_id: i32,

    pub original_element_id: Option<i32>,

    #[sea_orm(column_type = "Text")]
    pub answer: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub edited_answer: Option<String>,
}

impl Model {
    /// Editor-revised text if present, else the reviewer's own
    pub fn best_answer(&self) -> &str {
        self.edited_answer.as_deref().unwrap_or(&self.answer)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
