//! Article entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workflow stage values
pub mod stage {
    pub const UNSUBMITTED: &str = "Unsubmitted";
    pub const UNASSIGNED: &str = "Unassigned";
    pub const ASSIGNED: &str = "Assigned";
    pub const UNDER_REVIEW: &str = "Under Review";
    pub const UNDER_REVISION: &str = "Under Revision";
    pub const ACCEPTED: &str = "Accepted";
    pub const PUBLISHED: &str = "Published";
    pub const REJECTED: &str = "Rejected";

    /// Stages during which review assignments are live
    pub const REVIEW_STAGES: [&str; 4] = [UNASSIGNED, ASSIGNED, UNDER_REVIEW, UNDER_REVISION];
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission_article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub journal_id: i32,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub subtitle: Option<String>,

    #[sea_orm(column_name = "abstract", column_type = "Text", nullable)]
    pub abstract_text: Option<String>,

    pub language: Option<String>,

    pub stage: String,

    pub is_import: bool,

    pub date_submitted: Option<DateTimeWithTimeZone>,

    pub date_accepted: Option<DateTimeWithTimeZone>,

    pub date_published: Option<DateTimeWithTimeZone>,

    pub date_declined: Option<DateTimeWithTimeZone>,

    pub page_numbers: Option<String>,

    pub first_page: Option<i32>,

    pub last_page: Option<i32>,

    pub total_pages: Option<i32>,

    pub article_number: Option<String>,

    pub peer_reviewed: bool,

    pub is_remote: bool,

    pub remote_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub competing_interests: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub custom_how_to_cite: Option<String>,

    pub section_id: Option<i32>,

    pub license_id: Option<i32>,

    pub primary_issue_id: Option<i32>,

    pub large_image_file_id: Option<i32>,

    pub thumbnail_image_file_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
