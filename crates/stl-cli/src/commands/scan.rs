//! Scan command implementation

use std::path::Path;

use colored::Colorize;

use crate::error::Result;

/// Print the inventory of `root`.
pub fn run_scan(root: &Path, json: bool) -> Result<()> {
    let records = stl_fs::scan(root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for record in &records {
        println!("{}  {}", record.content_hash.dimmed(), record.relative_path);
    }
    println!();
    println!("{} {} files", "=>".blue().bold(), records.len());
    Ok(())
}
