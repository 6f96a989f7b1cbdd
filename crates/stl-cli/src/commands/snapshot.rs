//! Snapshot command implementation

use std::path::Path;

use colored::Colorize;
use stl_core::SyncConfig;

use super::scan_production;
use crate::error::Result;

/// Copy the production tree into `<production_root>/<staging_name>`.
pub fn run_snapshot(config_path: &Path) -> Result<()> {
    let config = SyncConfig::load(config_path)?;
    let records = scan_production(&config)?;
    let target = config.snapshot_dir();

    let copied = stl_fs::copy_inventory(&config.production_root, &records, &target)?;

    println!(
        "{} Copied {} of {} files to {}",
        "OK".green().bold(),
        copied,
        records.len(),
        target.display().to_string().cyan()
    );
    Ok(())
}
