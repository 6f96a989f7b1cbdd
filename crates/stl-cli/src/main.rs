//! staging2live CLI
//!
//! The thin outer layer over the sync engine: scanning, snapshots, the
//! file-hash index and selective sync.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Scan { root, json } => commands::run_scan(&root, json),
        Commands::Snapshot { config } => commands::run_snapshot(&config),
        Commands::Index { config } => commands::run_index(&config),
        Commands::Sync {
            config,
            file_changes,
            db_changes,
            files,
            rows,
            json,
        } => commands::run_sync(&commands::SyncArgs {
            config,
            file_changes,
            db_changes,
            files,
            rows,
            json,
        }),
    }
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(verbose: bool) -> Result<()> {
    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);
    let result = if verbose {
        let subscriber = builder
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = builder.with_env_filter(filter).finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    result.map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
    Ok(())
}
