//! `import-users`: create accounts from a CSV export and grant journal roles

use crate::context::Context;
use anyhow::Context as _;
use clap::Args;
use pressforge_common::db::models::{Account, Journal, Role};
use pressforge_common::db::NewAccount;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info, warn};
use validator::Validate;

/// CSV column headers that grant a role, with the role slug they map to
pub const ROLE_COLUMNS: [(&str, &str); 9] = [
    ("Author", "author"),
    ("Editor", "editor"),
    ("Reviewer", "reviewer"),
    ("Copyeditor", "copyeditor"),
    ("Production Manager", "production"),
    ("Typesetter", "typesetter"),
    ("Proofing Manager", "proofing-manager"),
    ("Proofreader", "proofreader"),
    ("Section Editor", "section-editor"),
];

#[derive(Debug, Args)]
pub struct ImportUsersArgs {
    /// CSV file with Email, Username, First Name, Last Name and role columns
    #[arg(long)]
    pub csv_path: PathBuf,

    /// Journal the roles are granted in
    #[arg(long)]
    pub journal_code: String,

    /// Create accounts active and activate existing inactive ones
    #[arg(long)]
    pub activate_accounts: bool,

    /// Report what would happen without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// One CSV row
#[derive(Debug, Validate)]
struct AccountRow {
    #[validate(email)]
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    /// Slugs of the roles marked `yes`
    roles: Vec<&'static str>,
}

impl AccountRow {
    fn from_record(record: &HashMap<String, String>) -> Self {
        let field = |name: &str| {
            record
                .get(name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        let email = field("Email");
        let username = match field("Username") {
            name if name.is_empty() => email.clone(),
            name => name,
        };
        let roles = ROLE_COLUMNS
            .iter()
            .filter(|(column, _)| {
                record
                    .get(*column)
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
            })
            .map(|(_, slug)| *slug)
            .collect();

        Self {
            email,
            username,
            first_name: field("First Name"),
            last_name: field("Last Name"),
            roles,
        }
    }
}

pub async fn execute(ctx: &Context, args: ImportUsersArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let repo = ctx.repository();
    let Some(journal) = repo.find_journal_by_code(&args.journal_code).await? else {
        writeln!(out, "Journal with code '{}' does not exist.", args.journal_code)?;
        return Ok(());
    };

    let roles: HashMap<String, Role> = repo
        .list_roles()
        .await?
        .into_iter()
        .map(|role| (role.slug.clone(), role))
        .collect();

    let mut reader = csv::Reader::from_path(&args.csv_path)
        .with_context(|| format!("cannot open {}", args.csv_path.display()))?;

    if args.dry_run {
        writeln!(out, "Running in dry-run mode. No changes will be saved.")?;
    }

    for (index, record) in reader.deserialize::<HashMap<String, String>>().enumerate() {
        let line = index + 2;
        let row = AccountRow::from_record(&record?);

        if row.email.is_empty() || row.validate().is_err() {
            warn!(line, email = %row.email, "Skipping row without a valid email");
            writeln!(out, "Row {} has no valid Email; skipping.", line)?;
            continue;
        }

        if let Err(e) = import_row(ctx, &journal, &roles, &row, &args, out).await {
            error!(line, email = %row.email, error = %e, "Row import failed");
            writeln!(out, "Error importing {}: {}", row.email, e)?;
        }
    }

    info!(journal = %journal.code, dry_run = args.dry_run, "Import finished");
    writeln!(out, "Import complete.")?;
    Ok(())
}

async fn import_row(
    ctx: &Context,
    journal: &Journal,
    roles: &HashMap<String, Role>,
    row: &AccountRow,
    args: &ImportUsersArgs,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let repo = ctx.repository();

    let (account, created): (Account, bool) = if args.dry_run {
        match repo.find_account_by_email_or_username(&row.email).await? {
            Some(account) => (account, false),
            None => {
                writeln!(out, "Would create user: {}", row.email)?;
                return Ok(());
            }
        }
    } else {
        repo.get_or_create_account(NewAccount {
            email: &row.email,
            username: &row.username,
            first_name: &row.first_name,
            last_name: &row.last_name,
            is_active: args.activate_accounts,
        })
        .await?
    };

    if created {
        writeln!(out, "Created user: {}", row.email)?;
    }

    let account = if !created && args.activate_accounts && !account.is_active {
        let account = if args.dry_run {
            account
        } else {
            repo.activate_account(account).await?
        };
        writeln!(out, "Activated user: {}", row.email)?;
        account
    } else {
        account
    };

    for slug in &row.roles {
        let Some(role) = roles.get(*slug) else {
            warn!(slug, "Role does not exist, not granted");
            continue;
        };
        if args.dry_run {
            writeln!(out, "Would assign role '{}' to {}.", role.name, row.email)?;
            continue;
        }
        let (_, granted) = repo
            .get_or_create_account_role(account.id, journal.id, role.id)
            .await?;
        if granted {
            writeln!(out, "Assigned role '{}' to {}.", role.name, row.email)?;
        }
    }

    Ok(())
}
