//! Command implementations for stl-cli

pub mod index;
pub mod scan;
pub mod snapshot;
pub mod sync;

use std::path::{Path, PathBuf};

use stl_core::SyncConfig;
use stl_db::SqliteStore;
use stl_fs::FileRecord;

use crate::error::{CliError, Result};

pub use index::run_index;
pub use scan::run_scan;
pub use snapshot::run_snapshot;
pub use sync::{SyncArgs, run_sync};

/// Scan the production root, leaving out the snapshot directory nested
/// inside it.
pub(crate) fn scan_production(config: &SyncConfig) -> Result<Vec<FileRecord>> {
    let snapshot_prefix = format!("{}/", config.staging_name);
    let records = stl_fs::scan(&config.production_root)?;
    Ok(records
        .into_iter()
        .filter(|record| !record.relative_path.as_str().starts_with(&snapshot_prefix))
        .collect())
}

/// Open the database named in the configuration.
pub(crate) fn open_store(config: &SyncConfig, config_path: &Path) -> Result<SqliteStore> {
    let database: &PathBuf = config.database.as_ref().ok_or_else(|| {
        CliError::user(format!(
            "No database configured in {}",
            config_path.display()
        ))
    })?;
    Ok(SqliteStore::open(database)?)
}
