//! Index command implementation

use std::path::Path;

use colored::Colorize;
use stl_core::{SyncConfig, record_inventory};

use super::{open_store, scan_production};
use crate::error::Result;

/// Record the production inventory in the file-hash table.
pub fn run_index(config_path: &Path) -> Result<()> {
    let config = SyncConfig::load(config_path)?;
    let store = open_store(&config, config_path)?;
    let records = scan_production(&config)?;
    let table = config.filehash_table();

    let inserted = record_inventory(&store, &table, &records)?;

    println!(
        "{} Indexed {} new of {} files in {}",
        "OK".green().bold(),
        inserted,
        records.len(),
        table.cyan()
    );
    Ok(())
}
