//! Journal / press setting values

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_settingvalue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub group_name: String,

    pub name: String,

    /// `None` marks the press-wide default
    pub journal_id: Option<i32>,

    #[sea_orm(column_type = "Text")]
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
