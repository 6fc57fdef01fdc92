//! External identifiers attached to an article

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links a copied article back to its source article's primary key
pub const PUBID: &str = "pubid";

pub const DOI: &str = "doi";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "identifiers_identifier")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub article_id: i32,

    pub id_type: String,

    pub identifier: String,

    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
