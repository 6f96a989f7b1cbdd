//! Change reconciliation and application engine for staging2live
//!
//! This crate sits above the Layer 0 crates and implements:
//!
//! - **Change lists**: the flat, legacy-grouped and post-type-grouped
//!   shapes produced by the comparers
//! - **Locator**: resolving a `(table, id)` request to exactly one change
//! - **Appliers**: copying/deleting files and inserting/updating/deleting
//!   rows on production, reporting per item
//! - **Synchronizer**: the orchestrator tying both together
//!
//! # Architecture
//!
//! ```text
//!                 stl-cli (outer layer)
//!                        |
//!                    stl-core
//!                        |
//!                +-------+-------+
//!                |               |
//!             stl-fs          stl-db
//! ```
//!
//! # Example
//!
//! ```ignore
//! use stl_core::{StaticChanges, SyncConfig, Synchronizer};
//! use stl_db::SqliteStore;
//!
//! let config = SyncConfig::new("/var/www/live");
//! let store = SqliteStore::open("site.db")?;
//! let sync = Synchronizer::new(&config, Box::new(store))
//!     .with_file_source(Box::new(StaticChanges::default()));
//! let results = sync.sync(&["wp-config.php".to_string()], &[]);
//! ```

pub mod apply;
pub mod changes;
pub mod collab;
pub mod config;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod locate;
pub mod sync;

pub use apply::{FileChangeApplier, RowChangeApplier, TablePrefixes};
pub use changes::{ChangeList, ChangeRecord, ChangeType, FileChanges, Group, OrderedMap, RowId};
pub use collab::{
    ChangeCache, DB_CHANGES_CACHE_KEY, DbChangeSource, FILE_CHANGES_CACHE_KEY, FileChangeSource,
    JsonChangeSource, MemoryCache, NoopCache, NoopHook, PostSyncHook, StaticChanges,
};
pub use config::SyncConfig;
pub use error::{Error, Result, SyncError};
pub use inventory::record_inventory;
pub use ledger::{ResultLedger, SyncResults};
pub use locate::{ChangeOrigin, LocatedChange, locate};
pub use sync::{Synchronizer, TableRowRequest};
