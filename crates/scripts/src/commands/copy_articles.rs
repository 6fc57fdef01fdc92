//! `copy-articles`: copy articles from one journal into another

use crate::context::Context;
use clap::Args;
use pressforge_common::errors::AppError;
use pressforge_replicator::{ArticleScope, BatchReport, ReplicationOptions, Replicator};
use std::io::Write;
use tracing::info;

#[derive(Debug, Args)]
pub struct CopyArticlesArgs {
    /// Source journal code
    #[arg(long)]
    pub source: String,

    /// Target journal code
    #[arg(long)]
    pub target: String,

    /// Only copy articles whose primary issue is this issue
    #[arg(long, conflicts_with = "article")]
    pub issue: Option<i32>,

    /// Only copy this article
    #[arg(long)]
    pub article: Option<i32>,

    /// Prefer the title translation and galleys in this language
    #[arg(long)]
    pub language: Option<String>,

    /// Always create a fresh copy instead of updating an earlier one; no DOI
    /// is minted
    #[arg(long)]
    pub create_only: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CopyArticlesArgs {
    fn scope(&self) -> ArticleScope {
        match (self.article, self.issue) {
            (Some(id), _) => ArticleScope::Article(id),
            (None, Some(id)) => ArticleScope::Issue(id),
            (None, None) => ArticleScope::Journal,
        }
    }
}

pub async fn execute(ctx: &Context, args: CopyArticlesArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let options = ReplicationOptions {
        update_existing: !args.create_only,
        target_language: args.language.clone(),
        languages: ctx.config.press.languages.clone(),
    };

    let replicator = Replicator::new(
        ctx.pool.clone(),
        ctx.store(),
        ctx.config.press.base_url.clone(),
    );

    info!(source = %args.source, target = %args.target, scope = ?args.scope(), "Copying articles");
    let report = replicator
        .copy_articles(&args.source, &args.target, args.scope(), &options)
        .await?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(AppError::from)?;
        writeln!(out, "{}", json)?;
    } else {
        write_report(&report, &args.source, out)?;
    }
    Ok(())
}

fn write_report(report: &BatchReport, source: &str, out: &mut dyn Write) -> std::io::Result<()> {
    for id in &report.missing {
        writeln!(out, "Article {} not found in journal {}", id, source)?;
    }
    for outcome in &report.copied {
        writeln!(out, "{}", outcome)?;
        if let Some(doi) = &outcome.doi {
            writeln!(out, "  DOI: {}", doi)?;
        }
        for warning in &outcome.warnings {
            writeln!(out, "  Warning: {}", warning)?;
        }
    }
    for (id, error) in &report.failed {
        writeln!(out, "Error copying article {}: {}", id, error)?;
    }
    Ok(())
}
