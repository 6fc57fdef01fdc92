//! `setting-value`: set a setting on several journals at once

use crate::context::Context;
use clap::Args;
use std::io::Write;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct SettingValueArgs {
    pub setting_group: String,

    pub setting_name: String,

    /// New value
    #[arg(short, long)]
    pub value: String,

    /// Journal codes to update
    #[arg(short, long, num_args = 1.., required = true)]
    pub codes: Vec<String>,
}

pub async fn execute(ctx: &Context, args: SettingValueArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let repo = ctx.repository();
    let journals = repo.find_journals_by_codes(&args.codes).await?;

    for code in &args.codes {
        if !journals.iter().any(|j| &j.code == code) {
            warn!(code = %code, "Unknown journal code");
            writeln!(out, "Journal with code '{}' does not exist.", code)?;
        }
    }

    for journal in &journals {
        let old = repo
            .get_setting_value(&args.setting_group, &args.setting_name, Some(journal.id))
            .await?;
        repo.save_setting(&args.setting_group, &args.setting_name, Some(journal.id), &args.value)
            .await?;

        info!(
            journal = %journal.code,
            group = %args.setting_group,
            name = %args.setting_name,
            "Setting updated"
        );
        writeln!(
            out,
            "Updating {}. Old setting value {}, new setting value {}",
            journal.name,
            old.as_deref().unwrap_or("(unset)"),
            args.value
        )?;
    }

    Ok(())
}
