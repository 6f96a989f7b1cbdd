//! Staging snapshot: copy an inventory into a target directory

use std::path::Path;

use crate::{FileRecord, Result, io};

/// Copy every file listed in `records` from `root` into `target`,
/// preserving relative paths.
///
/// Files that disappeared after the scan are skipped. Returns the number of
/// files copied.
pub fn copy_inventory(root: &Path, records: &[FileRecord], target: &Path) -> Result<usize> {
    io::ensure_dir(target)?;

    let mut copied = 0;
    for record in records {
        let relative = record.relative_path.to_native();
        let source = root.join(&relative);
        if !source.is_file() {
            tracing::debug!(path = %record.relative_path, "Source vanished since scan, skipping");
            continue;
        }
        io::copy_with_parents(&source, &target.join(&relative))?;
        copied += 1;
    }

    tracing::info!(copied, target = ?target, "Snapshot copy complete");
    Ok(copied)
}
