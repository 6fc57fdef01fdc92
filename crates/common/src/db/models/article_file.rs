//! Article ↔ file link, tagged with the file category

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission_article_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub article_id: i32,

    pub file_id: i32,

    /// `manuscript`, `data_figure` or `source`
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
