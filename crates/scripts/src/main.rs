//! PressForge command line
//!
//! Maintenance scripts run against a publishing platform database:
//! cross-journal article copies, XSLT title/abstract rewrites, user import,
//! review export and cleanup, bulk setting changes and journal listings.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pressforge_common::{config::AppConfig, db::DbPool, VERSION};
use pressforge_scripts::commands::{
    clean_reviews, copy_articles, export_reviews, import_users, list_journals, setting_value,
    transform,
};
use pressforge_scripts::Context;
use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pressforge", version, about = "Journal platform maintenance scripts", long_about = None)]
struct Cli {
    /// Configuration file; defaults to config/default, config/<APP_ENV> and config/local
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy articles from one journal into another
    CopyArticles(copy_articles::CopyArticlesArgs),

    /// Rewrite article titles from their XML galleys through a stylesheet
    TransformTitles(transform::TransformArgs),

    /// Rewrite article abstracts from their XML galleys through a stylesheet
    TransformAbstracts(transform::TransformArgs),

    /// Create accounts and journal roles from a CSV file
    ImportUsers(import_users::ImportUsersArgs),

    /// Export a journal's review assignments and answers to CSV
    ExportReviews(export_reviews::ExportReviewsArgs),

    /// Move editor notes out of review answers into the editor comments
    CleanReviews(clean_reviews::CleanReviewsArgs),

    /// Set a setting value on several journals
    SettingValue(setting_value::SettingValueArgs),

    /// List journal names, codes or domains
    ListJournals(list_journals::ListJournalsArgs),
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    // Reports go to stdout, logs to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.observability.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;

    init_tracing(&config);
    info!("Starting PressForge scripts v{}", VERSION);

    let pool = DbPool::new(&config.database).await.map_err(|e| {
        error!(error = %e, "Failed to connect to database");
        e
    })?;
    pool.ping().await?;

    let processor = transform::Xsltproc::new(config.scripts.xsltproc.clone());
    let ctx = Context::new(config, pool);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::CopyArticles(args) => copy_articles::execute(&ctx, args, &mut out).await?,
        Commands::TransformTitles(args) => {
            transform::execute(&ctx, transform::TransformField::Title, args, &processor, &mut out)
                .await?
        }
        Commands::TransformAbstracts(args) => {
            transform::execute(&ctx, transform::TransformField::Abstract, args, &processor, &mut out)
                .await?
        }
        Commands::ImportUsers(args) => import_users::execute(&ctx, args, &mut out).await?,
        Commands::ExportReviews(args) => export_reviews::execute(&ctx, args, &mut out).await?,
        Commands::CleanReviews(args) => clean_reviews::execute(&ctx, args, &mut out).await?,
        Commands::SettingValue(args) => setting_value::execute(&ctx, args, &mut out).await?,
        Commands::ListJournals(args) => list_journals::execute(&ctx, args, &mut out).await?,
    }

    out.flush()?;
    Ok(())
}
