//! Syncs a user data YAML file into the affiliation store.
//!
//! # Responsibility
//! - Compose `load` and `UserData::store` into one all-or-nothing command.
//! - Exit non-zero on any load or store failure.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use userdata_core::db::open_db;
use userdata_core::{default_log_level, init_logging, load, SqliteAffiliationRepository};

#[derive(Parser)]
#[command(name = "userdata_cli")]
#[command(version)]
#[command(about = "Load contributor affiliations from YAML and write them to the store")]
struct Cli {
    /// User data YAML document.
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database receiving the affiliations.
    #[arg(long, default_value = "userdata.db")]
    db: PathBuf,

    /// Absolute directory for rotating log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Load and flatten only; do not touch the database.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let data = load(&cli.file).context("loading user data")?;

    if cli.dry_run {
        println!(
            "users={} affiliations={} (dry run, nothing written)",
            data.users.len(),
            data.export_records().len()
        );
        return Ok(());
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("opening affiliation store {}", cli.db.display()))?;
    let repo = SqliteAffiliationRepository::new(&conn);
    data.store(&repo).context("storing user affiliations")?;

    info!(
        "event=userdata_sync module=cli status=ok file={} db={}",
        cli.file.display(),
        cli.db.display()
    );
    println!(
        "users={} affiliations={} written to {}",
        data.users.len(),
        data.affiliation_count(),
        cli.db.display()
    );
    Ok(())
}
