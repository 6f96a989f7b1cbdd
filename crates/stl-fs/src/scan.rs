//! File inventory scanner
//!
//! Walks a site root and hashes every included file. The exclusion rules
//! are fixed:
//!
//! - entries whose name starts with `.` are skipped, except `.htaccess`;
//! - directories whose name starts with `cache` are skipped together with
//!   their contents (files such as `cache.php` are kept).
//!
//! Traversal is depth-first with entries sorted by file name, so two scans
//! of an unchanged tree return identical sequences. Symbolic links are
//! followed; link cycles are reported by the walker and skipped.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::checksum::file_hash;
use crate::{Error, NormalizedPath, Result};

/// Dotfile that is always part of the inventory.
pub const HTACCESS: &str = ".htaccess";

/// Directory-name prefix excluded from the inventory.
pub const CACHE_DIR_PREFIX: &str = "cache";

/// One scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root, `/`-separated
    #[serde(rename = "file_path")]
    pub relative_path: NormalizedPath,
    /// Lowercase hex SHA-256 of the file contents
    #[serde(rename = "hash")]
    pub content_hash: String,
}

/// Returns true when an entry with this name is left out of the inventory.
pub fn is_excluded(name: &str, is_dir: bool) -> bool {
    if name.starts_with('.') && name != HTACCESS {
        return true;
    }
    is_dir && name.starts_with(CACHE_DIR_PREFIX)
}

/// Inventory scanner bound to one root directory.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    /// Create a scanner for `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDirectory`] if `root` is not an existing
    /// directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::InvalidDirectory {
                path: root.to_path_buf(),
            });
        }
        let root = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;
        Ok(Self { root })
    }

    /// The canonical scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and hash every included file.
    ///
    /// Unreadable entries are logged and skipped; they never abort the
    /// scan.
    pub fn scan(&self) -> Result<Vec<FileRecord>> {
        let mut records = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded_entry(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry during scan: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            match file_hash(entry.path()) {
                Ok(content_hash) => records.push(FileRecord {
                    relative_path: NormalizedPath::new(relative),
                    content_hash,
                }),
                Err(e) => tracing::warn!("Skipping file that could not be hashed: {}", e),
            }
        }

        tracing::debug!(root = ?self.root, files = records.len(), "Inventory scan complete");
        Ok(records)
    }
}

/// Scan `root` and return its file inventory.
pub fn scan(root: impl AsRef<Path>) -> Result<Vec<FileRecord>> {
    Scanner::new(root)?.scan()
}

// With links followed, the file type is that of the link target.
fn is_excluded_entry(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    is_excluded(&name, entry.file_type().is_dir())
}
