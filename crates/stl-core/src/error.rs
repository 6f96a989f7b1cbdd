//! Error types for stl-core

use std::path::PathBuf;

/// Result type for stl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that fail a whole operation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A change-source collaborator could not produce its change list
    #[error("Change source error: {message}")]
    ChangeSource { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from stl-fs
    #[error(transparent)]
    Fs(#[from] stl_fs::Error),

    /// Data-store error from stl-db
    #[error(transparent)]
    Db(#[from] stl_db::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

/// Failure of a single synchronized item.
///
/// These are recorded in a [`ResultLedger`](crate::ResultLedger) and never
/// abort a sync; the `Display` text is the ledger message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("File not found in change list.")]
    FileNotInChangeList,

    #[error("Refusing to touch path outside the site root: {path}")]
    UnsafePath { path: String },

    #[error("Source file missing in staging: {path}")]
    SourceFileMissing { path: String },

    #[error("Could not create directory {path}: {reason}")]
    DirectoryCreateFailed { path: String, reason: String },

    #[error("Could not copy file: {reason}")]
    CopyFailed { reason: String },

    #[error("Could not delete file: {reason}")]
    DeleteFailed { reason: String },

    #[error("Entry with ID {id} not found in change list for table {table}.")]
    EntryNotFoundInChangeList { table: String, id: String },

    #[error("Could not find primary key for table {table}.")]
    PrimaryKeyNotFound { table: String },

    #[error("Could not find entry with ID {id} in staging table {table}.")]
    RowNotFoundInStaging { table: String, id: String },

    #[error("Could not insert entry with ID {id} in table {table}: {reason}")]
    InsertFailed {
        table: String,
        id: String,
        reason: String,
    },

    #[error("Could not update entry with ID {id} in table {table}: {reason}")]
    UpdateFailed {
        table: String,
        id: String,
        reason: String,
    },

    #[error("Could not delete entry with ID {id} from table {table}: {reason}")]
    DeleteRowFailed {
        table: String,
        id: String,
        reason: String,
    },

    #[error("Unknown change type {change_type:?} for {item}.")]
    UnknownChangeType { item: String, change_type: String },

    #[error("Invalid table data: {reason}")]
    InvalidTableData { reason: String },

    #[error("Change list unavailable: {reason}")]
    ChangeListUnavailable { reason: String },
}
