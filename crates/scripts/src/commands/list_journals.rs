//! `list-journals`: print journal names, codes or domains

use crate::context::Context;
use clap::{Args, ValueEnum};
use pressforge_common::db::models::Journal;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListType {
    Names,
    Codes,
    Domains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayType {
    /// One space-separated line
    One,
    /// One journal per line
    Multi,
}

#[derive(Debug, Args)]
pub struct ListJournalsArgs {
    #[arg(value_enum)]
    pub list_type: ListType,

    #[arg(value_enum, default_value = "multi")]
    pub display_type: DisplayType,
}

fn field(journal: &Journal, list_type: ListType) -> &str {
    match list_type {
        ListType::Names => &journal.name,
        ListType::Codes => &journal.code,
        ListType::Domains => journal.domain.as_deref().unwrap_or(""),
    }
}

pub async fn execute(ctx: &Context, args: ListJournalsArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let journals = ctx.repository().list_journals().await?;
    let values: Vec<&str> = journals.iter().map(|j| field(j, args.list_type)).collect();

    match args.display_type {
        DisplayType::One => writeln!(out, "{}", values.join(" "))?,
        DisplayType::Multi => {
            for value in values {
                writeln!(out, "{}", value)?;
            }
        }
    }
    Ok(())
}
