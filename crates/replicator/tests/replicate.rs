//! Article replication against an in-memory database and a temporary file store

use pressforge_common::db::models::*;
use pressforge_common::db::{ArticleFileCategory, DbPool};
use pressforge_common::storage::FileStore;
use pressforge_common::testing::{count, memory_pool, Seed};
use pressforge_replicator::{ArticleScope, ReplicationError, ReplicationOptions, Replicator};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use std::path::Path;
use tempfile::TempDir;

const PRESS_URL: &str = "http://press.example";

struct Harness {
    _dir: TempDir,
    pool: DbPool,
    store: FileStore,
    replicator: Replicator,
}

async fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let pool = memory_pool().await;
    let store = FileStore::new(dir.path());
    let replicator = Replicator::new(pool.clone(), store.clone(), PRESS_URL);
    Harness {
        _dir: dir,
        pool,
        store,
        replicator,
    }
}

fn create_only() -> ReplicationOptions {
    ReplicationOptions {
        update_existing: false,
        ..Default::default()
    }
}

/// Every regular file below `root`
fn stored_files(root: &Path) -> Vec<std::path::PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else {
                found.push(path);
            }
        }
    }
    found
}

#[tokio::test]
async fn test_copy_single_article_creates_one_copy_with_pubid() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    seed.article_with(olh.id, "Humanities Now", |a| a.id = Set(123))
        .await;

    let report = h
        .replicator
        .copy_articles("olh", "alluvium", ArticleScope::Article(123), &create_only())
        .await
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.copied.len(), 1);
    let outcome = &report.copied[0];
    assert!(outcome.created);
    assert_eq!(outcome.source_id, 123);
    assert_ne!(outcome.target_id, 123);
    assert_eq!(
        outcome.to_string(),
        format!(
            "Copied article 123 to {} ({}/alluvium/article/id/{}/)",
            outcome.target_id, PRESS_URL, outcome.target_id
        )
    );

    let repo = h.pool.repository();
    let copies = repo.list_articles_in_journal(alluvium.id).await.unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].title, "Humanities Now");
    assert!(copies[0].is_import);

    let pubids = IdentifierEntity::find()
        .filter(IdentifierColumn::IdType.eq(PUBID))
        .all(h.pool.connection())
        .await
        .unwrap();
    assert_eq!(pubids.len(), 1);
    assert_eq!(pubids[0].identifier, "123");
    assert_eq!(pubids[0].article_id, outcome.target_id);
    assert!(pubids[0].enabled);

    assert_eq!(count(h.pool.connection(), IssueEntity).await, 0);
    assert_eq!(outcome.doi, None);
}

#[tokio::test]
async fn test_rerun_updates_copy_in_place() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "Original title").await;
    seed.frozen_author(source.id, "Eve", 1).await;
    let manuscript = seed.file(Some(source.id), "ms.docx", "application/msword").await;
    seed.article_file(source.id, manuscript.id, ArticleFileCategory::Manuscript.as_str())
        .await;
    h.store
        .write(&h.store.file_path(&manuscript, source.id), b"manuscript")
        .await
        .unwrap();

    let options = ReplicationOptions::default();
    let first = h.replicator.replicate(&source, &alluvium, &options).await.unwrap();

    // Change the source, then copy again
    let source = h
        .pool
        .repository()
        .update_article_title(source, "Revised title".into())
        .await
        .unwrap();
    let second = h.replicator.replicate(&source, &alluvium, &options).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.target_id, second.target_id);

    let repo = h.pool.repository();
    let copies = repo.list_articles_in_journal(alluvium.id).await.unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].title, "Revised title");

    assert_eq!(repo.list_frozen_authors(second.target_id).await.unwrap().len(), 1);
    assert_eq!(
        repo.article_files(second.target_id, ArticleFileCategory::Manuscript)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        IdentifierEntity::find()
            .filter(IdentifierColumn::ArticleId.eq(second.target_id))
            .filter(IdentifierColumn::IdType.eq(PUBID))
            .all(h.pool.connection())
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_create_only_mode_never_matches_earlier_copy() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "Twice").await;

    let first = h.replicator.replicate(&source, &alluvium, &create_only()).await.unwrap();
    let second = h.replicator.replicate(&source, &alluvium, &create_only()).await.unwrap();

    assert_ne!(first.target_id, second.target_id);
    assert!(second.created);
}

#[tokio::test]
async fn test_rerun_moves_copy_to_new_primary_issue() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let issue_type = seed.issue_type(olh.id, "issue").await;
    let first_issue = seed.issue(olh.id, issue_type.id, 5, "1").await;
    let second_issue = seed.issue(olh.id, issue_type.id, 5, "2").await;
    let source = seed
        .article_with(olh.id, "Moving", |a| a.primary_issue_id = Set(Some(first_issue.id)))
        .await;

    let options = ReplicationOptions::default();
    let first = h.replicator.replicate(&source, &alluvium, &options).await.unwrap();

    let repo = h.pool.repository();
    let mut row: ArticleActiveModel = source.into();
    row.primary_issue_id = Set(Some(second_issue.id));
    let source = repo.update_article(row).await.unwrap();
    let second = h.replicator.replicate(&source, &alluvium, &options).await.unwrap();
    assert_eq!(first.target_id, second.target_id);

    let copy = repo.find_article(second.target_id).await.unwrap().unwrap();
    let memberships = repo.article_issue_ids(copy.id).await.unwrap();
    assert_eq!(memberships.len(), 1);
    assert_eq!(Some(memberships[0]), copy.primary_issue_id);
    let issue = repo.find_issue(memberships[0]).await.unwrap().unwrap();
    assert_eq!((issue.journal_id, issue.volume, issue.issue.as_str()), (alluvium.id, 5, "2"));

    // Dropping the primary issue removes the last membership too
    let mut row: ArticleActiveModel = source.into();
    row.primary_issue_id = Set(None);
    let source = repo.update_article(row).await.unwrap();
    h.replicator.replicate(&source, &alluvium, &options).await.unwrap();
    assert!(repo.article_issue_ids(copy.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rerun_drops_translations_the_source_no_longer_has() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "Bilingual").await;
    seed.translation(source.id, "en", "Bilingual").await;
    let welsh = seed.translation(source.id, "cy", "Dwyieithog").await;

    let options = ReplicationOptions::default();
    let first = h.replicator.replicate(&source, &alluvium, &options).await.unwrap();
    let repo = h.pool.repository();
    assert_eq!(repo.list_translations(first.target_id).await.unwrap().len(), 2);

    ArticleTranslationEntity::delete_by_id(welsh.id)
        .exec(h.pool.connection())
        .await
        .unwrap();
    let second = h.replicator.replicate(&source, &alluvium, &options).await.unwrap();

    let languages: Vec<String> = repo
        .list_translations(second.target_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.language)
        .collect();
    assert_eq!(languages, vec!["en".to_string()]);
}

#[tokio::test]
async fn test_primary_issue_is_created_in_target_journal() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let issue_type = seed.issue_type(olh.id, "issue").await;
    let issue = seed.issue(olh.id, issue_type.id, 5, "2").await;
    let source = seed
        .article_with(olh.id, "In an issue", |a| a.primary_issue_id = Set(Some(issue.id)))
        .await;
    seed.issue_member(issue.id, source.id).await;

    let outcome = h
        .replicator
        .replicate(&source, &alluvium, &create_only())
        .await
        .unwrap();

    assert_eq!(count(h.pool.connection(), IssueEntity).await, 2);
    assert_eq!(count(h.pool.connection(), IssueTypeEntity).await, 2);

    let target_issue = IssueEntity::find()
        .filter(IssueColumn::JournalId.eq(alluvium.id))
        .one(h.pool.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(target_issue.volume, 5);
    assert_eq!(target_issue.issue, "2");

    let target_type = h
        .pool
        .repository()
        .find_issue_type(target_issue.issue_type_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(target_type.code, "issue");
    assert_eq!(target_type.journal_id, alluvium.id);

    let members = h.pool.repository().list_issue_articles(target_issue.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, outcome.target_id);
    assert_eq!(members[0].primary_issue_id, Some(target_issue.id));
}

#[tokio::test]
async fn test_reference_rows_are_reused_across_articles() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let section = seed.section(olh.id, "Articles").await;
    let licence = seed.licence(olh.id, "CC BY 4.0").await;
    let issue_type = seed.issue_type(olh.id, "issue").await;
    let issue = seed.issue(olh.id, issue_type.id, 1, "1").await;
    for title in ["First", "Second"] {
        let article = seed
            .article_with(olh.id, title, |a| {
                a.section_id = Set(Some(section.id));
                a.license_id = Set(Some(licence.id));
                a.primary_issue_id = Set(Some(issue.id));
            })
            .await;
        seed.issue_member(issue.id, article.id).await;
    }

    let report = h
        .replicator
        .copy_articles("olh", "alluvium", ArticleScope::Journal, &create_only())
        .await
        .unwrap();
    assert_eq!(report.copied.len(), 2);

    let conn = h.pool.connection();
    let sections = SectionEntity::find()
        .filter(SectionColumn::JournalId.eq(alluvium.id))
        .all(conn)
        .await
        .unwrap();
    let licences = LicenceEntity::find()
        .filter(LicenceColumn::JournalId.eq(alluvium.id))
        .all(conn)
        .await
        .unwrap();
    let issues = IssueEntity::find()
        .filter(IssueColumn::JournalId.eq(alluvium.id))
        .all(conn)
        .await
        .unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(licences.len(), 1);
    assert_eq!(issues.len(), 1);
    assert_eq!(count(conn, IssueTypeEntity).await, 2);

    for copy in h.pool.repository().list_articles_in_journal(alluvium.id).await.unwrap() {
        assert_eq!(copy.section_id, Some(sections[0].id));
        assert_eq!(copy.license_id, Some(licences[0].id));
        assert_eq!(copy.primary_issue_id, Some(issues[0].id));
    }
    assert_eq!(
        h.pool.repository().list_issue_articles(issues[0].id).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_owned_entities_are_new_and_shared_entities_are_linked() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "Graph").await;

    let author = seed.account("author@example.org").await;
    seed.author(source.id, author.id).await;
    let keyword = seed.keyword(source.id, "rivers").await;
    let note = seed.publisher_note(source.id, "Corrected").await;
    let frozen = seed.frozen_author(source.id, "Lovelace", 1).await;

    let pdf = seed.file(Some(source.id), "paper.pdf", "application/pdf").await;
    let css = seed.file(Some(source.id), "paper.css", "text/css").await;
    let xsl = seed.file(None, "shared.xsl", "application/xslt+xml").await;
    let image = seed.file(Some(source.id), "fig1.png", "image/png").await;
    let galley = seed
        .galley(source.id, "PDF", Some(pdf.id), Some(css.id), Some(xsl.id))
        .await;
    seed.galley_image(galley.id, image.id).await;

    let payload: &[u8] = b"%PDF-1.7\n\x00\x9f binary";
    h.store.write(&h.store.file_path(&pdf, source.id), payload).await.unwrap();
    h.store.write(&h.store.file_path(&css, source.id), b"body{}").await.unwrap();
    h.store.write(&h.store.file_path(&image, source.id), b"\x89PNG").await.unwrap();

    let outcome = h
        .replicator
        .replicate(&source, &alluvium, &create_only())
        .await
        .unwrap();
    assert!(outcome.warnings.is_empty());
    let target_id = outcome.target_id;
    let repo = h.pool.repository();

    // Shared rows are linked, not duplicated
    assert_eq!(repo.article_author_ids(target_id).await.unwrap(), vec![author.id]);
    assert_eq!(repo.article_keyword_ids(target_id).await.unwrap(), vec![keyword.id]);
    assert_eq!(repo.article_publisher_note_ids(target_id).await.unwrap(), vec![note.id]);
    assert_eq!(count(h.pool.connection(), KeywordEntity).await, 1);
    assert_eq!(count(h.pool.connection(), PublisherNoteEntity).await, 1);

    // Owned rows get fresh identities bound to the copy
    let frozen_copies = repo.list_frozen_authors(target_id).await.unwrap();
    assert_eq!(frozen_copies.len(), 1);
    assert_ne!(frozen_copies[0].id, frozen.id);
    assert_eq!(frozen_copies[0].last_name, "Lovelace");

    let galleys = repo.list_galleys(target_id).await.unwrap();
    assert_eq!(galleys.len(), 1);
    let galley_copy = &galleys[0];
    assert_ne!(galley_copy.id, galley.id);
    assert_eq!(galley_copy.xsl_file_id, Some(xsl.id));

    let pdf_copy = repo.find_file(galley_copy.file_id.unwrap()).await.unwrap().unwrap();
    let css_copy = repo.find_file(galley_copy.css_file_id.unwrap()).await.unwrap().unwrap();
    assert_ne!(pdf_copy.id, pdf.id);
    assert_ne!(css_copy.id, css.id);
    assert_eq!(pdf_copy.article_id, Some(target_id));
    assert_eq!(css_copy.article_id, Some(target_id));

    let images = repo.galley_images(galley_copy.id).await.unwrap();
    assert_eq!(images.len(), 1);
    assert_ne!(images[0].id, image.id);
    assert_eq!(images[0].article_id, Some(target_id));

    // Payloads are byte-identical
    assert_eq!(
        h.store.read(&h.store.file_path(&pdf_copy, target_id)).await.unwrap(),
        payload
    );
    assert_eq!(
        h.store.read(&h.store.file_path(&images[0], target_id)).await.unwrap(),
        b"\x89PNG"
    );

    // The source keeps its own rows untouched
    let source_galleys = repo.list_galleys(source.id).await.unwrap();
    assert_eq!(source_galleys, vec![galley]);
    assert_eq!(repo.list_frozen_authors(source.id).await.unwrap(), vec![frozen]);
}

#[tokio::test]
async fn test_missing_supplementary_payload_warns_and_keeps_record() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "Data paper").await;
    let inner = seed.file(Some(source.id), "dataset.zip", "application/zip").await;
    seed.supplementary_file(source.id, inner.id, "Full dataset").await;

    let outcome = h
        .replicator
        .replicate(&source, &alluvium, &ReplicationOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.warnings.iter().filter(|w| w.contains("dataset.zip")).count(), 1);

    let wrappers = h
        .pool
        .repository()
        .supplementary_files(outcome.target_id)
        .await
        .unwrap();
    assert_eq!(wrappers.len(), 1);
    assert_eq!(wrappers[0].description, "");
    let new_inner = h
        .pool
        .repository()
        .find_file(wrappers[0].file_id)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(new_inner.id, inner.id);
    assert_eq!(new_inner.article_id, Some(outcome.target_id));
}

#[tokio::test]
async fn test_failure_rolls_back_article_and_payloads() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "Broken").await;
    let manuscript = seed.file(Some(source.id), "ms.pdf", "application/pdf").await;
    seed.article_file(source.id, manuscript.id, ArticleFileCategory::Manuscript.as_str())
        .await;
    h.store
        .write(&h.store.file_path(&manuscript, source.id), b"ms")
        .await
        .unwrap();
    // Galley pointing at a file record that does not exist
    seed.galley(source.id, "PDF", Some(999), None, None).await;

    let report = h
        .replicator
        .copy_articles("olh", "alluvium", ArticleScope::Journal, &create_only())
        .await
        .unwrap();

    assert!(report.copied.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, source.id);

    let repo = h.pool.repository();
    assert!(repo.list_articles_in_journal(alluvium.id).await.unwrap().is_empty());
    assert_eq!(count(h.pool.connection(), FileEntity).await, 1);
    assert_eq!(count(h.pool.connection(), IdentifierEntity).await, 0);
    assert_eq!(
        stored_files(h.store.root()),
        vec![h.store.file_path(&manuscript, source.id)]
    );
}

#[tokio::test]
async fn test_doi_is_minted_from_prefix_and_pattern() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "Citable").await;
    seed.setting("Identifiers", "crossref_prefix", Some(alluvium.id), "10.16995")
        .await;

    let outcome = h
        .replicator
        .replicate(&source, &alluvium, &ReplicationOptions::default())
        .await
        .unwrap();

    let expected = format!("10.16995/alluvium.{}", outcome.target_id);
    assert_eq!(outcome.doi.as_deref(), Some(expected.as_str()));
    let stored = h
        .pool
        .repository()
        .find_identifier(outcome.target_id, DOI)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.identifier, expected);
}

#[tokio::test]
async fn test_missing_doi_prefix_is_a_warning() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "No prefix").await;

    let outcome = h
        .replicator
        .replicate(&source, &alluvium, &ReplicationOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.doi, None);
    assert!(outcome.warnings.iter().any(|w| w.contains("no DOI minted")));
    assert!(h
        .pool
        .repository()
        .find_identifier(outcome.target_id, DOI)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_language_hint_picks_title_and_galleys() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    let source = seed.article(olh.id, "Rivers of Wales").await;
    seed.translation(source.id, "cy", "Afonydd Cymru").await;
    let welsh = seed.file(Some(source.id), "cy.pdf", "application/pdf").await;
    let english = seed.file(Some(source.id), "en.pdf", "application/pdf").await;
    seed.galley(source.id, "PDF (cy)", Some(welsh.id), None, None).await;
    seed.galley(source.id, "PDF", Some(english.id), None, None).await;

    let options = ReplicationOptions {
        target_language: Some("cy".into()),
        languages: vec!["en".into(), "cy".into()],
        ..Default::default()
    };
    let outcome = h.replicator.replicate(&source, &alluvium, &options).await.unwrap();

    let repo = h.pool.repository();
    let copy = repo.find_article(outcome.target_id).await.unwrap().unwrap();
    assert_eq!(copy.title, "Afonydd Cymru");

    let default_title = repo
        .find_translation(copy.id, &alluvium.default_language)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(default_title.title, "Afonydd Cymru");
    assert!(repo.find_translation(copy.id, "cy").await.unwrap().is_some());

    let galleys = repo.list_galleys(copy.id).await.unwrap();
    assert_eq!(galleys.len(), 1);
    assert_eq!(galleys[0].label, "PDF (cy)");
}

#[tokio::test]
async fn test_unsupported_language_is_rejected_before_writing() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    seed.article(olh.id, "Anything").await;

    let options = ReplicationOptions {
        target_language: Some("fr".into()),
        languages: vec!["en".into()],
        ..Default::default()
    };
    let err = h
        .replicator
        .copy_articles("olh", "alluvium", ArticleScope::Journal, &options)
        .await
        .unwrap_err();

    assert!(matches!(err, ReplicationError::UnsupportedLanguage(_)));
    assert!(h
        .pool
        .repository()
        .list_articles_in_journal(alluvium.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_unknown_journal_aborts_batch() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    seed.journal("olh").await;

    let err = h
        .replicator
        .copy_articles("olh", "nowhere", ArticleScope::Journal, &create_only())
        .await
        .unwrap_err();

    assert!(matches!(err, ReplicationError::JournalNotFound(code) if code == "nowhere"));
    assert_eq!(count(h.pool.connection(), ArticleEntity).await, 0);
}

#[tokio::test]
async fn test_missing_article_is_reported() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    seed.journal("olh").await;
    let alluvium = seed.journal("alluvium").await;
    // Article exists, but in the target journal rather than the source
    let elsewhere = seed.article(alluvium.id, "Elsewhere").await;

    let report = h
        .replicator
        .copy_articles("olh", "alluvium", ArticleScope::Article(elsewhere.id), &create_only())
        .await
        .unwrap();

    assert!(report.copied.is_empty());
    assert_eq!(report.missing, vec![elsewhere.id]);
}

#[tokio::test]
async fn test_issue_scope_copies_primary_issue_articles() {
    let h = harness().await;
    let seed = Seed::new(&h.pool);
    let olh = seed.journal("olh").await;
    seed.journal("alluvium").await;
    let issue_type = seed.issue_type(olh.id, "issue").await;
    let issue = seed.issue(olh.id, issue_type.id, 3, "1").await;
    let inside = seed
        .article_with(olh.id, "Inside", |a| a.primary_issue_id = Set(Some(issue.id)))
        .await;
    seed.article(olh.id, "Outside").await;

    let report = h
        .replicator
        .copy_articles("olh", "alluvium", ArticleScope::Issue(issue.id), &create_only())
        .await
        .unwrap();
    assert_eq!(report.copied.len(), 1);
    assert_eq!(report.copied[0].source_id, inside.id);

    let err = h
        .replicator
        .copy_articles("olh", "alluvium", ArticleScope::Issue(4242), &create_only())
        .await
        .unwrap_err();
    assert!(matches!(err, ReplicationError::IssueNotFound { issue_id: 4242, .. }));
}
