//! File record; the payload lives on disk under the owning article

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Mime types that mark a galley file as JATS XML
pub const XML_MIMETYPES: [&str; 2] = ["application/xml", "text/xml"];

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_file")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning article; files without one have no article storage path
    pub article_id: Option<i32>,

    pub mime_type: String,

    pub original_filename: String,

    pub uuid_filename: String,

    pub label: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub date_uploaded: DateTimeWithTimeZone,

    pub is_galley: bool,
}

impl Model {
    pub fn is_xml(&self) -> bool {
        XML_MIMETYPES.contains(&self.mime_type.as_str())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
