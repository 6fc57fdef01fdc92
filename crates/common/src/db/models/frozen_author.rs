//! Snapshot of an author's details at submission time, owned by one article

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission_frozenauthor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub article_id: i32,

    pub author_id: Option<i32>,

    pub first_name: String,

    pub middle_name: Option<String>,

    pub last_name: String,

    pub institution: String,

    pub department: Option<String>,

    pub frozen_email: Option<String>,

    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
