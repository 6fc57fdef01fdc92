//! CLI commands

pub mod clean_reviews;
pub mod copy_articles;
pub mod export_reviews;
pub mod import_users;
pub mod list_journals;
pub mod setting_value;
pub mod transform;
