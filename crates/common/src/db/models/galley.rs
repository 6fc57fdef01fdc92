//! Galley: a typeset rendition of an article

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_galley")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub article_id: i32,

    /// Owned rendition file
    pub file_id: Option<i32>,

    /// Owned stylesheet
    pub css_file_id: Option<i32>,

    /// Shared transformation stylesheet; never copied
    pub xsl_file_id: Option<i32>,

    pub label: String,

    #[sea_orm(column_name = "type")]
    pub kind: String,

    pub sequence: i32,

    pub public: bool,
}

impl Model {
    /// Whether the galley label names the given language code, e.g.
    /// `PDF (cy)` or `HTML - CY` for `cy`
    pub fn matches_language(&self, code: &str) -> bool {
        self.label
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token.eq_ignore_ascii_case(code))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn galley(label: &str) -> Model {
        Model {
            id: 1,
            article_id: 1,
            file_id: None,
            css_file_id: None,
            xsl_file_id: None,
            label: label.into(),
            kind: "pdf".into(),
            sequence: 0,
            public: true,
        }
    }

    #[test]
    fn test_language_label_match() {
        assert!(galley("PDF (cy)").matches_language("cy"));
        assert!(galley("HTML - CY").matches_language("cy"));
        assert!(!galley("PDF").matches_language("cy"));
        assert!(!galley("Cymraeg PDF").matches_language("cy"));
    }
}
