//! Journal licence, keyed by short name within a journal

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission_licence")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub journal_id: i32,

    pub short_name: String,

    pub name: String,

    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
