//! Issue type (issue, collection, ...), keyed by code within a journal

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_issuetype")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub journal_id: i32,

    pub code: String,

    pub pretty_name: String,

    pub custom_plural: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
