//! `export-reviews`: write a journal's review assignments and answers to CSV

use crate::context::Context;
use chrono::{DateTime, FixedOffset};
use clap::Args;
use pressforge_common::db::models::ReviewAnswer;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const FIXED_COLUMNS: [&str; 11] = [
    "assignment_id",
    "article_id",
    "reviewer",
    "editor",
    "decision",
    "date_requested",
    "date_due",
    "date_accepted",
    "date_declined",
    "date_complete",
    "is_complete",
];

#[derive(Debug, Args)]
pub struct ExportReviewsArgs {
    /// Journal code
    #[arg(long)]
    pub journal: String,

    /// Directory to write the CSV to; defaults to the configured export dir
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// File name the export of `journal_code` is written to
pub fn export_file_name(journal_code: &str) -> String {
    format!("review_assignments_export_{}.csv", journal_code)
}

fn format_date(date: Option<DateTime<FixedOffset>>) -> String {
    date.map(|d| d.to_rfc3339()).unwrap_or_default()
}

pub async fn execute(ctx: &Context, args: ExportReviewsArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let repo = ctx.repository();

    let assignments = match repo.find_journal_by_code(&args.journal).await? {
        Some(journal) => repo.review_assignments_for_journal(journal.id).await?,
        None => Vec::new(),
    };
    if assignments.is_empty() {
        writeln!(out, "No review assignments found for journal '{}'", args.journal)?;
        return Ok(());
    }

    let assignment_ids: Vec<i32> = assignments.iter().map(|a| a.id).collect();
    let answers = repo.review_answers(&assignment_ids).await?;

    let mut element_ids: Vec<i32> = answers.iter().filter_map(|a| a.original_element_id).collect();
    element_ids.sort_unstable();
    element_ids.dedup();

    // Element id -> column header, in element order
    let headers: BTreeMap<i32, String> = repo
        .review_form_elements(&element_ids)
        .await?
        .into_iter()
        .map(|element| {
            let header = if element.name.trim().is_empty() {
                format!("element_{}", element.id)
            } else {
                element.name
            };
            (element.id, header)
        })
        .collect();

    let mut by_assignment: HashMap<i32, Vec<&ReviewAnswer>> = HashMap::new();
    for answer in &answers {
        by_assignment.entry(answer.assignment_id).or_default().push(answer);
    }

    let dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| ctx.config.scripts.export_dir.clone());
    let path = dir.join(export_file_name(&args.journal));
    let mut writer = csv::Writer::from_path(&path)?;

    let mut header_row: Vec<&str> = FIXED_COLUMNS.to_vec();
    header_row.extend(headers.values().map(String::as_str));
    writer.write_record(&header_row)?;

    let mut names: HashMap<i32, String> = HashMap::new();
    for assignment in &assignments {
        let reviewer = account_name(ctx, &mut names, Some(assignment.reviewer_id)).await?;
        let editor = account_name(ctx, &mut names, assignment.editor_id).await?;

        let mut record = vec![
            assignment.id.to_string(),
            assignment.article_id.to_string(),
            reviewer,
            editor,
            assignment.decision.clone().unwrap_or_default(),
            assignment.date_requested.to_rfc3339(),
            format_date(assignment.date_due),
            format_date(assignment.date_accepted),
            format_date(assignment.date_declined),
            format_date(assignment.date_complete),
            assignment.is_complete.to_string(),
        ];

        let own_answers = by_assignment.get(&assignment.id);
        for element_id in headers.keys() {
            let cell = own_answers
                .and_then(|list| {
                    list.iter()
                        .rev()
                        .find(|a| a.original_element_id == Some(*element_id))
                })
                .map(|a| a.best_answer().to_string())
                .unwrap_or_default();
            record.push(cell);
        }

        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(journal = %args.journal, rows = assignments.len(), path = %path.display(), "Reviews exported");
    writeln!(out, "Exported data to {}", path.display())?;
    Ok(())
}

/// Full name of an account, cached; empty for no account
async fn account_name(
    ctx: &Context,
    cache: &mut HashMap<i32, String>,
    account_id: Option<i32>,
) -> anyhow::Result<String> {
    let Some(id) = account_id else {
        return Ok(String::new());
    };
    if let Some(name) = cache.get(&id) {
        return Ok(name.clone());
    }
    let name = ctx
        .repository()
        .find_account(id)
        .await?
        .map(|account| account.full_name())
        .unwrap_or_default();
    cache.insert(id, name.clone());
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::{context, output};
    use pressforge_common::testing::Seed;

    #[tokio::test]
    async fn test_export_writes_one_column_per_element() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path()).await;
        let seed = Seed::new(&ctx.pool);
        let journal = seed.journal("olh").await;
        let article = seed.article(journal.id, "Reviewed").await;
        let reviewer = seed.account("reviewer@example.org").await;
        let assignment = seed.review_assignment(article.id, reviewer.id, None).await;
        let named = seed.review_form_element("Recommendation").await;
        let unnamed = seed.review_form_element("").await;
        let unused = seed.review_form_element("Unused").await;
        seed.review_answer(assignment.id, Some(named.id), "Accept", Some("Accept with edits"))
            .await;
        seed.review_answer(assignment.id, Some(unnamed.id), "Fine", None).await;

        let mut buf = Vec::new();
        execute(
            &ctx,
            ExportReviewsArgs {
                journal: "olh".into(),
                output_dir: None,
            },
            &mut buf,
        )
        .await
        .unwrap();

        let path = dir.path().join("review_assignments_export_olh.csv");
        assert!(output(buf).contains("Exported data to"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), FIXED_COLUMNS.len() + 2);
        assert_eq!(&headers[11], "Recommendation");
        assert_eq!(&headers[12], format!("element_{}", unnamed.id).as_str());
        assert!(!headers.iter().any(|h| h == unused.name));

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], assignment.id.to_string());
        assert_eq!(&rows[0][2], reviewer.full_name());
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][11], "Accept with edits");
        assert_eq!(&rows[0][12], "Fine");
    }

    #[tokio::test]
    async fn test_no_assignments_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path()).await;
        Seed::new(&ctx.pool).journal("olh").await;

        let mut buf = Vec::new();
        execute(
            &ctx,
            ExportReviewsArgs {
                journal: "olh".into(),
                output_dir: None,
            },
            &mut buf,
        )
        .await
        .unwrap();

        assert_eq!(output(buf), "No review assignments found for journal 'olh'\n");
        assert!(!dir.path().join(export_file_name("olh")).exists());
    }
}
