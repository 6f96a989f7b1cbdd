//! Copy and remove primitives used when applying file changes

use std::fs::{self, File};
use std::path::Path;

use crate::{Error, Result};

/// Create `dir` and every missing ancestor.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Copy `source` over `destination` without exposing a partially written
/// destination.
///
/// The bytes are copied into a temporary sibling of `destination`, flushed,
/// then renamed into place. The destination's parent directory must
/// already exist.
pub fn copy_atomic(source: &Path, destination: &Path) -> Result<()> {
    let temp_name = format!(
        ".{}.{}.stl.tmp",
        destination
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = destination.with_file_name(&temp_name);

    if let Err(e) = fs::copy(source, &temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(source, e));
    }

    // The copy carries the source's permissions, which may be read-only.
    let flushed = File::open(&temp_path).and_then(|file| file.sync_all());
    if let Err(e) = flushed {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    fs::rename(&temp_path, destination).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(destination, e)
    })
}

/// Copy `source` to `destination`, creating the destination's parent
/// directories first.
pub fn copy_with_parents(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        ensure_dir(parent)?;
    }
    copy_atomic(source, destination)
}

/// Remove a single file.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
