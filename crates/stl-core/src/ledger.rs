//! Per-item result ledgers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SyncError;

/// Outcome of one sync call, keyed by item (file path or `table:id`).
///
/// An item appears in at most one of the two maps; recording it again
/// moves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLedger {
    pub success: BTreeMap<String, String>,
    pub error: BTreeMap<String, String>,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, item: impl Into<String>, message: impl Into<String>) {
        let item = item.into();
        self.error.remove(&item);
        self.success.insert(item, message.into());
    }

    pub fn record_error(&mut self, item: impl Into<String>, error: &SyncError) {
        let item = item.into();
        tracing::warn!(item = %item, "{}", error);
        self.success.remove(&item);
        self.error.insert(item, error.to_string());
    }

    /// Record the outcome of applying one item.
    pub fn record(&mut self, item: impl Into<String>, outcome: Result<String, SyncError>) {
        match outcome {
            Ok(message) => self.record_success(item, message),
            Err(error) => self.record_error(item, &error),
        }
    }

    pub fn success_count(&self) -> usize {
        self.success.len()
    }

    pub fn error_count(&self) -> usize {
        self.error.len()
    }

    /// True when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.error.is_empty()
    }
}

/// Results of a full sync call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResults {
    pub files: ResultLedger,
    pub db: ResultLedger,
}

impl SyncResults {
    pub fn is_clean(&self) -> bool {
        self.files.is_clean() && self.db.is_clean()
    }
}
