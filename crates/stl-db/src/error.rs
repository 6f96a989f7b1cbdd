//! Error types for stl-db

/// Result type for stl-db operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stl-db operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Table or column name that cannot be safely interpolated into SQL
    #[error("Invalid SQL identifier: {name:?}")]
    InvalidIdentifier { name: String },

    /// Statement failed in the SQLite backend
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
