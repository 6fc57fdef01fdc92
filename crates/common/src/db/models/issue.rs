//! Issue entity, keyed by (volume, issue, issue type) within a journal

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_issue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub journal_id: i32,

    pub volume: i32,

    /// Issue number as displayed; not necessarily numeric
    pub issue: String,

    pub issue_type_id: i32,

    pub date: Option<DateTimeWithTimeZone>,

    pub issue_title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
