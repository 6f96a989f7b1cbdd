//! Sync command implementation

use std::path::PathBuf;

use colored::Colorize;
use stl_core::{JsonChangeSource, ResultLedger, SyncConfig, Synchronizer, TableRowRequest};

use super::open_store;
use crate::error::{CliError, Result};

/// Arguments of `stl sync`.
#[derive(Debug, Clone)]
pub struct SyncArgs {
    pub config: PathBuf,
    pub file_changes: Option<PathBuf>,
    pub db_changes: Option<PathBuf>,
    pub files: Vec<String>,
    pub rows: Vec<TableRowRequest>,
    pub json: bool,
}

/// Run the synchronizer and print both ledgers.
///
/// Exits with an error when any item failed, after printing the results.
pub fn run_sync(args: &SyncArgs) -> Result<()> {
    if args.files.is_empty() && args.rows.is_empty() {
        return Err(CliError::user(
            "Nothing to sync: pass at least one --file or --row",
        ));
    }

    let config = SyncConfig::load(&args.config)?;
    let store = open_store(&config, &args.config)?;
    let source = JsonChangeSource::new(args.file_changes.clone(), args.db_changes.clone());

    let synchronizer = Synchronizer::new(&config, Box::new(store))
        .with_file_source(Box::new(source.clone()))
        .with_db_source(Box::new(source));
    let results = synchronizer.sync(&args.files, &args.rows);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        if !args.files.is_empty() {
            print_ledger("Files", &results.files);
        }
        if !args.rows.is_empty() {
            print_ledger("Database", &results.db);
        }
    }

    if !results.is_clean() {
        let failed = results.files.error_count() + results.db.error_count();
        return Err(CliError::user(format!("{failed} item(s) failed to sync")));
    }
    Ok(())
}

fn print_ledger(title: &str, ledger: &ResultLedger) {
    println!("{} {}", "=>".blue().bold(), title.bold());
    for (item, message) in &ledger.success {
        println!("   {} {}: {}", "OK".green().bold(), item.cyan(), message);
    }
    for (item, message) in &ledger.error {
        println!("   {} {}: {}", "FAILED".red().bold(), item.cyan(), message);
    }
}
