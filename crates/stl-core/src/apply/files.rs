//! File change applier

use std::path::{Path, PathBuf};

use stl_fs::{NormalizedPath, io};

use crate::changes::{ChangeType, FileChanges};
use crate::{ResultLedger, SyncError};

/// Copies added/modified files from staging and removes deleted ones from
/// production.
#[derive(Debug, Clone)]
pub struct FileChangeApplier {
    staging_root: PathBuf,
    production_root: PathBuf,
}

impl FileChangeApplier {
    pub fn new(staging_root: impl Into<PathBuf>, production_root: impl Into<PathBuf>) -> Self {
        Self {
            staging_root: staging_root.into(),
            production_root: production_root.into(),
        }
    }

    /// Apply the changes for the requested paths.
    ///
    /// A path missing from `changes` is reported as an error; the applier
    /// never guesses what should happen to it.
    pub fn apply<S: AsRef<str>>(&self, requested: &[S], changes: &FileChanges) -> ResultLedger {
        let mut ledger = ResultLedger::new();
        for path in requested {
            let path = path.as_ref();
            let outcome = match changes.get(path) {
                Some(change) => self.apply_one(path, change),
                None => Err(SyncError::FileNotInChangeList),
            };
            ledger.record(path, outcome);
        }
        ledger
    }

    /// Apply a single change and return the success message.
    pub fn apply_one(&self, path: &str, change: &ChangeType) -> Result<String, SyncError> {
        let relative = checked_relative(path)?;
        tracing::debug!(path, change = %change, "Applying file change");

        match change {
            ChangeType::Added | ChangeType::Modified => self.copy_to_production(path, &relative),
            ChangeType::Deleted => self.delete_from_production(&relative),
            ChangeType::Unknown(label) => Err(SyncError::UnknownChangeType {
                item: path.to_string(),
                change_type: label.clone(),
            }),
        }
    }

    fn copy_to_production(&self, path: &str, relative: &Path) -> Result<String, SyncError> {
        let source = self.staging_root.join(relative);
        let destination = self.production_root.join(relative);

        if !source.is_file() {
            return Err(SyncError::SourceFileMissing {
                path: path.to_string(),
            });
        }

        if let Some(dir) = destination.parent() {
            io::ensure_dir(dir).map_err(|e| SyncError::DirectoryCreateFailed {
                path: NormalizedPath::new(dir).to_string(),
                reason: e.to_string(),
            })?;
        }

        io::copy_atomic(&source, &destination).map_err(|e| SyncError::CopyFailed {
            reason: e.to_string(),
        })?;
        Ok("File copied successfully.".to_string())
    }

    fn delete_from_production(&self, relative: &Path) -> Result<String, SyncError> {
        let target = self.production_root.join(relative);

        // symlink_metadata so a dangling link still counts as present
        if target.symlink_metadata().is_err() {
            return Ok("File already deleted.".to_string());
        }

        io::remove_file(&target).map_err(|e| SyncError::DeleteFailed {
            reason: e.to_string(),
        })?;
        Ok("File deleted successfully.".to_string())
    }
}

/// Turn a change-map key into a path that stays under the site root.
fn checked_relative(path: &str) -> Result<PathBuf, SyncError> {
    let normalized = NormalizedPath::new(path);
    let segments: Vec<&str> = normalized.as_str().split('/').collect();

    let escapes = normalized.as_str().is_empty()
        || normalized.as_str().starts_with('/')
        || segments.iter().any(|s| *s == ".." || s.contains(':'));
    if escapes {
        return Err(SyncError::UnsafePath {
            path: path.to_string(),
        });
    }

    Ok(segments
        .into_iter()
        .filter(|s| !s.is_empty() && *s != ".")
        .collect())
}
