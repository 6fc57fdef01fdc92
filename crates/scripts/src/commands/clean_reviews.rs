//! `clean-reviews`: move editor text appended to review answers into the
//! assignment's comments for the editor

use crate::context::Context;
use clap::Args;
use pressforge_common::db::models::{ReviewAnswer, ReviewAssignment};
use pressforge_common::db::Repository;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::info;

#[derive(Debug, Args)]
pub struct CleanReviewsArgs {
    /// Journal whose in-review articles are cleaned
    pub journal_code: String,

    /// Text separating the reviewer's answer from the editor's notes
    pub separator: String,

    /// Only clean answers on this article
    #[arg(long)]
    pub article_id: Option<i32>,

    /// Report affected answers without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// Split `answer` at the first `separator`; `None` when it does not occur
fn split_answer<'a>(answer: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    answer
        .split_once(separator)
        .map(|(head, tail)| (head.trim_end(), tail.trim()))
}

pub async fn execute(ctx: &Context, args: CleanReviewsArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    if args.separator.is_empty() {
        anyhow::bail!("Separator must not be empty");
    }

    let repo = ctx.repository();
    let Some(journal) = repo.find_journal_by_code(&args.journal_code).await? else {
        writeln!(out, "Journal with code '{}' does not exist.", args.journal_code)?;
        return Ok(());
    };

    let answers = repo
        .review_answers_in_review_stages(journal.id, args.article_id)
        .await?;

    let mut heads: Vec<(ReviewAnswer, String)> = Vec::new();
    // Assignment id -> (assignment, editor notes in answer order)
    let mut tails: BTreeMap<i32, (ReviewAssignment, Vec<String>)> = BTreeMap::new();

    for (answer, assignment) in answers {
        let Some((head, tail)) = split_answer(&answer.answer, &args.separator) else {
            continue;
        };
        let (head, tail) = (head.to_string(), tail.to_string());

        if args.dry_run {
            writeln!(
                out,
                "Altering answer for article {}, assignment {}. found {}",
                assignment.article_id, assignment.id, args.separator
            )?;
        }

        if !tail.is_empty() {
            tails
                .entry(assignment.id)
                .or_insert_with(|| (assignment, Vec::new()))
                .1
                .push(tail);
        }
        heads.push((answer, head));
    }

    if args.dry_run || heads.is_empty() {
        return Ok(());
    }

    let txn = ctx.pool.begin().await?;
    let repo = Repository::new(&txn);
    let answer_count = heads.len();
    for (answer, head) in heads {
        repo.update_review_answer(answer, head).await?;
    }
    let assignment_count = tails.len();
    for (assignment, notes) in tails.into_values() {
        repo.set_comments_for_editor(assignment, notes.join("\n")).await?;
    }
    txn.commit().await?;

    info!(journal = %journal.code, answers = answer_count, assignments = assignment_count, "Reviews cleaned");
    writeln!(
        out,
        "Cleaned {} answers on {} assignments.",
        answer_count, assignment_count
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::{context, output};
    use pressforge_common::db::models::stage;
    use pressforge_common::testing::Seed;
    use sea_orm::Set;

    #[test]
    fn test_split_answer() {
        assert_eq!(
            split_answer("Looks good. ## Editor: chase refs", "##"),
            Some(("Looks good.", "Editor: chase refs"))
        );
        assert_eq!(split_answer("Looks good.", "##"), None);
    }

    struct Fixture {
        ctx: Context,
        assignment: ReviewAssignment,
        split: ReviewAnswer,
        plain: ReviewAnswer,
        published: ReviewAnswer,
        _dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path()).await;
        let seed = Seed::new(&ctx.pool);
        let journal = seed.journal("olh").await;
        let reviewer = seed.account("reviewer@example.org").await;

        let in_review = seed
            .article_with(journal.id, "In review", |a| a.stage = Set(stage::UNDER_REVIEW.to_string()))
            .await;
        let assignment = seed.review_assignment(in_review.id, reviewer.id, None).await;
        let split = seed
            .review_answer(assignment.id, None, "Sound method. --- check figure 2", None)
            .await;
        let plain = seed.review_answer(assignment.id, None, "Clear prose.", None).await;

        let done = seed.article(journal.id, "Published").await;
        let old = seed.review_assignment(done.id, reviewer.id, None).await;
        let published = seed
            .review_answer(old.id, None, "Fine --- editor note", None)
            .await;

        Fixture {
            ctx,
            assignment,
            split,
            plain,
            published,
            _dir: dir,
        }
    }

    fn args(dry_run: bool) -> CleanReviewsArgs {
        CleanReviewsArgs {
            journal_code: "olh".into(),
            separator: "---".into(),
            article_id: None,
            dry_run,
        }
    }

    async fn answer_text(ctx: &Context, answer: &ReviewAnswer) -> String {
        ctx.repository()
            .review_answers(&[answer.assignment_id])
            .await
            .unwrap()
            .into_iter()
            .find(|a| a.id == answer.id)
            .unwrap()
            .answer
    }

    #[tokio::test]
    async fn test_clean_moves_tail_to_editor_comments() {
        let f = fixture().await;

        let mut buf = Vec::new();
        execute(&f.ctx, args(false), &mut buf).await.unwrap();
        assert_eq!(output(buf), "Cleaned 1 answers on 1 assignments.\n");

        assert_eq!(answer_text(&f.ctx, &f.split).await, "Sound method.");
        assert_eq!(answer_text(&f.ctx, &f.plain).await, "Clear prose.");
        assert_eq!(answer_text(&f.ctx, &f.published).await, "Fine --- editor note");

        let assignment = f
            .ctx
            .repository()
            .find_review_assignment(f.assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(assignment.comments_for_editor.as_deref(), Some("check figure 2"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let f = fixture().await;

        let mut buf = Vec::new();
        execute(&f.ctx, args(true), &mut buf).await.unwrap();
        assert_eq!(
            output(buf),
            format!(
                "Altering answer for article {}, assignment {}. found ---\n",
                f.assignment.article_id, f.assignment.id
            )
        );

        assert_eq!(
            answer_text(&f.ctx, &f.split).await,
            "Sound method. --- check figure 2"
        );
        let assignment = f
            .ctx
            .repository()
            .find_review_assignment(f.assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(assignment.comments_for_editor, None);
    }

    #[tokio::test]
    async fn test_empty_separator_is_rejected() {
        let f = fixture().await;
        let mut a = args(false);
        a.separator = String::new();

        let mut buf = Vec::new();
        assert!(execute(&f.ctx, a, &mut buf).await.is_err());
    }
}
