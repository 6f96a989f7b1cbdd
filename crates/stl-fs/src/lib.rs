//! Filesystem layer for staging2live
//!
//! Provides the file inventory scanner, SHA-256 content hashing and the
//! copy/remove primitives the change appliers build on.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod scan;
pub mod snapshot;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use scan::{FileRecord, Scanner, scan};
pub use snapshot::copy_inventory;
