//! Review assignment entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review_reviewassignment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub article_id: i32,

    pub reviewer_id: i32,

    pub editor_id: Option<i32>,

    pub decision: Option<String>,

    pub date_requested: DateTimeWithTimeZone,

    pub date_due: Option<DateTimeWithTimeZone>,

    pub date_accepted: Option<DateTimeWithTimeZone>,

    pub date_declined: Option<DateTimeWithTimeZone>,

    pub date_complete: Option<DateTimeWithTimeZone>,

    pub is_complete: bool,

    #[sea_orm(column_type = "Text", nullable)]
    pub comments_for_editor: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
