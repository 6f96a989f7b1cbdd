//! Synchronizer implementation
//!
//! The Synchronizer carries selected staging changes over to production.
//! Every requested item is processed in order and lands in a ledger; a
//! failure is recorded and the run moves on.
//!
//! Concurrent runs against the same production site are not safe and must
//! be serialized by the caller.

use std::path::PathBuf;

use stl_db::DataStore;

use super::request::TableRowRequest;
use crate::apply::{FileChangeApplier, RowChangeApplier, TablePrefixes};
use crate::collab::{
    ChangeCache, DB_CHANGES_CACHE_KEY, DbChangeSource, FILE_CHANGES_CACHE_KEY, FileChangeSource,
    NoopCache, NoopHook, PostSyncHook, StaticChanges,
};
use crate::config::SyncConfig;
use crate::locate::locate;
use crate::{ResultLedger, SyncError, SyncResults};

/// Orchestrates file and row synchronization for one site.
pub struct Synchronizer<'a> {
    staging_root: PathBuf,
    production_root: PathBuf,
    prefixes: TablePrefixes,
    store: Box<dyn DataStore + 'a>,
    file_source: Box<dyn FileChangeSource + 'a>,
    db_source: Box<dyn DbChangeSource + 'a>,
    cache: Box<dyn ChangeCache + 'a>,
    hook: Box<dyn PostSyncHook + 'a>,
}

impl<'a> Synchronizer<'a> {
    /// Create a synchronizer for the site described by `config`.
    ///
    /// Change sources start out empty and the cache and post-sync hook do
    /// nothing until replaced with the `with_*` builders.
    pub fn new(config: &SyncConfig, store: Box<dyn DataStore + 'a>) -> Self {
        Self {
            staging_root: config.staging_root(),
            production_root: config.production_root.clone(),
            prefixes: config.prefixes(),
            store,
            file_source: Box::new(StaticChanges::default()),
            db_source: Box::new(StaticChanges::default()),
            cache: Box::new(NoopCache),
            hook: Box::new(NoopHook),
        }
    }

    pub fn with_file_source(mut self, source: Box<dyn FileChangeSource + 'a>) -> Self {
        self.file_source = source;
        self
    }

    pub fn with_db_source(mut self, source: Box<dyn DbChangeSource + 'a>) -> Self {
        self.db_source = source;
        self
    }

    pub fn with_cache(mut self, cache: Box<dyn ChangeCache + 'a>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_hook(mut self, hook: Box<dyn PostSyncHook + 'a>) -> Self {
        self.hook = hook;
        self
    }

    /// Sync the requested files and rows.
    ///
    /// Each half only runs when something of that kind was requested, so an
    /// empty row list neither invalidates the database cache nor triggers
    /// the post-sync hook.
    pub fn sync<S: AsRef<str>>(&self, files: &[S], rows: &[TableRowRequest]) -> SyncResults {
        let mut results = SyncResults::default();
        if !files.is_empty() {
            results.files = self.sync_files(files);
        }
        if !rows.is_empty() {
            results.db = self.sync_db(rows);
        }
        results
    }

    /// Sync files from staging to production.
    pub fn sync_files<S: AsRef<str>>(&self, files: &[S]) -> ResultLedger {
        let ledger = match self.file_source.file_changes() {
            Ok(changes) => {
                FileChangeApplier::new(&self.staging_root, &self.production_root)
                    .apply(files, &changes)
            }
            Err(e) => {
                tracing::warn!("File change list unavailable: {}", e);
                let error = SyncError::ChangeListUnavailable {
                    reason: e.to_string(),
                };
                let mut ledger = ResultLedger::new();
                for file in files {
                    ledger.record_error(file.as_ref(), &error);
                }
                ledger
            }
        };

        self.cache.invalidate(FILE_CHANGES_CACHE_KEY);

        tracing::info!(
            succeeded = ledger.success_count(),
            failed = ledger.error_count(),
            "File sync complete"
        );
        ledger
    }

    /// Sync database rows from staging to production.
    ///
    /// The post-sync hook runs once at the end whatever the outcome of the
    /// individual rows.
    pub fn sync_db(&self, rows: &[TableRowRequest]) -> ResultLedger {
        let mut ledger = ResultLedger::new();

        match self.db_source.db_changes() {
            Ok(changes) => {
                let applier = RowChangeApplier::new(self.store.as_ref(), self.prefixes.clone());

                for (index, request) in rows.iter().enumerate() {
                    let (table, id) = match request.validate() {
                        Ok(pair) => pair,
                        Err(error) => {
                            ledger.record_error(format!("entry #{}", index + 1), &error);
                            continue;
                        }
                    };

                    let item = request.to_string();
                    let outcome = match locate(&changes, table, id) {
                        Some(found) => {
                            tracing::debug!(
                                item = %item,
                                section = found.section,
                                origin = ?found.origin,
                                "Located change"
                            );
                            applier.apply(found.table(), id, found.record)
                        }
                        None => Err(SyncError::EntryNotFoundInChangeList {
                            table: table.to_string(),
                            id: id.to_string(),
                        }),
                    };
                    ledger.record(item, outcome);
                }
            }
            Err(e) => {
                tracing::warn!("Database change list unavailable: {}", e);
                let error = SyncError::ChangeListUnavailable {
                    reason: e.to_string(),
                };
                for request in rows {
                    ledger.record_error(request.to_string(), &error);
                }
            }
        }

        self.cache.invalidate(DB_CHANGES_CACHE_KEY);
        self.hook.after_db_sync();

        tracing::info!(
            succeeded = ledger.success_count(),
            failed = ledger.error_count(),
            "Database sync complete"
        );
        ledger
    }
}
