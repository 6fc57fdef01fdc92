//! Journal entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_journal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub code: String,

    pub name: String,

    /// Custom domain; journals without one are served under the press URL
    pub domain: Option<String>,

    pub default_language: String,
}

impl Model {
    /// Absolute URL of `path` on this journal's site
    pub fn site_url(&self, press_base_url: &str, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match self.domain.as_deref().filter(|d| !d.is_empty()) {
            Some(domain) => format!("https://{}/{}", domain.trim_end_matches('/'), path),
            None => format!(
                "{}/{}/{}",
                press_base_url.trim_end_matches('/'),
                self.code,
                path
            ),
        }
    }

    /// Public landing page of an article in this journal
    pub fn article_url(&self, press_base_url: &str, article_id: i32) -> String {
        self.site_url(press_base_url, &format!("article/id/{}/", article_id))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn journal(domain: Option<&str>) -> Model {
        Model {
            id: 1,
            code: "olh".into(),
            name: "Open Library of Humanities".into(),
            domain: domain.map(Into::into),
            default_language: "en".into(),
        }
    }

    #[test]
    fn test_article_url_with_domain() {
        let j = journal(Some("olh.example.org"));
        assert_eq!(
            j.article_url("http://press.example", 7),
            "https://olh.example.org/article/id/7/"
        );
    }

    #[test]
    fn test_article_url_under_press() {
        let j = journal(None);
        assert_eq!(
            j.article_url("http://press.example/", 7),
            "http://press.example/olh/article/id/7/"
        );
    }
}
