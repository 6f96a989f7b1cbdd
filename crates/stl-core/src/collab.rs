//! Collaborator seams
//!
//! The comparers that build change lists, the change-list cache and the
//! post-sync URL rewrite live outside this crate. The synchronizer only
//! sees them through these traits.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use stl_fs::ConfigStore;

use crate::changes::{ChangeList, FileChanges};
use crate::{Error, Result};

/// Cache key of the file comparer's change map.
pub const FILE_CHANGES_CACHE_KEY: &str = "stl_file_changes";

/// Cache key of the database comparer's change list.
pub const DB_CHANGES_CACHE_KEY: &str = "stl_db_changes";

/// Supplies the file comparer's `path -> change` map.
pub trait FileChangeSource {
    fn file_changes(&self) -> Result<FileChanges>;
}

/// Supplies the database comparer's change list.
pub trait DbChangeSource {
    fn db_changes(&self) -> Result<ChangeList>;
}

/// Cache holding comparer output between requests.
pub trait ChangeCache {
    fn invalidate(&self, key: &str);
}

/// Called once at the end of every database sync.
pub trait PostSyncHook {
    fn after_db_sync(&self);
}

impl<F: Fn()> PostSyncHook for F {
    fn after_db_sync(&self) {
        self()
    }
}

/// Change lists held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticChanges {
    pub files: FileChanges,
    pub db: ChangeList,
}

impl StaticChanges {
    pub fn new(files: FileChanges, db: ChangeList) -> Self {
        Self { files, db }
    }
}

impl FileChangeSource for StaticChanges {
    fn file_changes(&self) -> Result<FileChanges> {
        Ok(self.files.clone())
    }
}

impl DbChangeSource for StaticChanges {
    fn db_changes(&self) -> Result<ChangeList> {
        Ok(self.db.clone())
    }
}

/// Change lists read from JSON documents on every request.
///
/// A missing document path means "no changes of that kind".
#[derive(Debug, Clone, Default)]
pub struct JsonChangeSource {
    files: Option<PathBuf>,
    db: Option<PathBuf>,
}

impl JsonChangeSource {
    pub fn new(files: Option<PathBuf>, db: Option<PathBuf>) -> Self {
        Self { files, db }
    }

    fn load<T: serde::de::DeserializeOwned + Default>(path: Option<&PathBuf>) -> Result<T> {
        let Some(path) = path else {
            return Ok(T::default());
        };
        ConfigStore::new()
            .load(path)
            .map_err(|e| Error::ChangeSource {
                message: e.to_string(),
            })
    }
}

impl FileChangeSource for JsonChangeSource {
    fn file_changes(&self) -> Result<FileChanges> {
        Self::load(self.files.as_ref())
    }
}

impl DbChangeSource for JsonChangeSource {
    fn db_changes(&self) -> Result<ChangeList> {
        Self::load(self.db.as_ref())
    }
}

/// In-process cache stand-in that remembers which keys were invalidated.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    invalidated: Arc<Mutex<Vec<String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys invalidated so far, oldest first.
    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ChangeCache for MemoryCache {
    fn invalidate(&self, key: &str) {
        tracing::debug!(key, "Invalidating cached change list");
        self.invalidated
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(key.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl ChangeCache for NoopCache {
    fn invalidate(&self, _key: &str) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl PostSyncHook for NoopHook {
    fn after_db_sync(&self) {}
}
