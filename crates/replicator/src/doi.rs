//! DOI synthesis
//!
//! A DOI is `<crossref prefix>/<suffix>`, where the suffix comes from the
//! journal's pattern with `{{ article.pk }}`-style placeholders filled in.

use crate::errors::ReplicationError;
use pressforge_common::db::models::{Article, Journal};
use regex_lite::{Captures, Regex};

pub const SETTING_GROUP: &str = "Identifiers";
pub const PREFIX_SETTING: &str = "crossref_prefix";
pub const PATTERN_SETTING: &str = "doi_pattern";

/// Suffix pattern used when the journal does not configure one
pub const DEFAULT_DOI_PATTERN: &str = "{{ article.journal.code }}.{{ article.pk }}";

const PLACEHOLDER: &str = r"\{\{\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}";

/// Fill the placeholders of `pattern` for `article` in `journal`.
/// Unknown placeholders render as nothing.
pub fn render_suffix(
    pattern: &str,
    article: &Article,
    journal: &Journal,
) -> Result<String, ReplicationError> {
    let placeholder =
        Regex::new(PLACEHOLDER).map_err(|e| ReplicationError::DoiPattern(e.to_string()))?;

    let rendered = placeholder.replace_all(pattern, |caps: &Captures| {
        match &caps[1] {
            "article.pk" | "article.id" => article.id.to_string(),
            "article.journal.code" | "journal.code" => journal.code.clone(),
            "article.page_numbers" => article.page_numbers.clone().unwrap_or_default(),
            "article.article_number" => article.article_number.clone().unwrap_or_default(),
            _ => String::new(),
        }
    });

    Ok(rendered.trim().to_string())
}

/// Join a prefix and suffix; `None` when either side is blank
pub fn assemble(prefix: &str, suffix: &str) -> Option<String> {
    let prefix = prefix.trim().trim_end_matches('/');
    let suffix = suffix.trim().trim_start_matches('/');
    if prefix.is_empty() || suffix.is_empty() {
        return None;
    }
    Some(format!("{}/{}", prefix, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pressforge_common::db::models::stage;

    fn journal() -> Journal {
        Journal {
            id: 2,
            code: "alluvium".into(),
            name: "Alluvium".into(),
            domain: None,
            default_language: "en".into(),
        }
    }

    fn article() -> Article {
        Article {
            id: 456,
            journal_id: 2,
            title: "Rivers".into(),
            subtitle: None,
            abstract_text: None,
            language: None,
            stage: stage::PUBLISHED.into(),
            is_import: true,
            date_submitted: Some(Utc::now().into()),
            date_accepted: None,
            date_published: None,
            date_declined: None,
            page_numbers: None,
            first_page: None,
            last_page: None,
            total_pages: None,
            article_number: Some("e12".into()),
            peer_reviewed: true,
            is_remote: false,
            remote_url: None,
            competing_interests: None,
            custom_how_to_cite: None,
            section_id: None,
            license_id: None,
            primary_issue_id: None,
            large_image_file_id: None,
            thumbnail_image_file_id: None,
        }
    }

    #[test]
    fn test_default_pattern() {
        let suffix = render_suffix(DEFAULT_DOI_PATTERN, &article(), &journal()).unwrap();
        assert_eq!(suffix, "alluvium.456");
    }

    #[test]
    fn test_custom_pattern_and_unknown_placeholder() {
        let suffix = render_suffix(
            "{{article.journal.code}}-{{ article.article_number }}{{ article.nope }}",
            &article(),
            &journal(),
        )
        .unwrap();
        assert_eq!(suffix, "alluvium-e12");
    }

    #[test]
    fn test_assemble() {
        assert_eq!(
            assemble("10.16995/", "alluvium.456").as_deref(),
            Some("10.16995/alluvium.456")
        );
        assert_eq!(assemble("  ", "alluvium.456"), None);
        assert_eq!(assemble("10.16995", ""), None);
    }
}
