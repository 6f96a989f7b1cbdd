//! Row change applier

use stl_db::{DataStore, Row, Value};

use crate::SyncError;
use crate::changes::alias::actual_table;
use crate::changes::{ChangeRecord, ChangeType, RowId};

/// Table-name prefixes of the two schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePrefixes {
    pub staging: String,
    pub production: String,
}

impl TablePrefixes {
    pub fn new(staging: impl Into<String>, production: impl Into<String>) -> Self {
        Self {
            staging: staging.into(),
            production: production.into(),
        }
    }

    pub fn staging_table(&self, table: &str) -> String {
        format!("{}{}", self.staging, table)
    }

    pub fn production_table(&self, table: &str) -> String {
        format!("{}{}", self.production, table)
    }
}

impl Default for TablePrefixes {
    fn default() -> Self {
        Self::new("wp_staging_", "wp_")
    }
}

/// Replays one located row change against production, reading row data
/// from staging.
///
/// The primary key is rediscovered for every row.
pub struct RowChangeApplier<'s> {
    store: &'s dyn DataStore,
    prefixes: TablePrefixes,
}

impl<'s> RowChangeApplier<'s> {
    pub fn new(store: &'s dyn DataStore, prefixes: TablePrefixes) -> Self {
        Self { store, prefixes }
    }

    /// Apply `change` to row `id` of `table` and return the success message.
    pub fn apply(&self, table: &str, id: &RowId, change: &ChangeRecord) -> Result<String, SyncError> {
        let table = actual_table(table);
        let production = self.prefixes.production_table(table);
        let staging = self.prefixes.staging_table(table);

        let primary_key = match self.store.primary_key(&production) {
            Ok(Some(key)) => key,
            Ok(None) => {
                return Err(SyncError::PrimaryKeyNotFound {
                    table: table.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(table = %production, "Primary key lookup failed: {}", e);
                return Err(SyncError::PrimaryKeyNotFound {
                    table: table.to_string(),
                });
            }
        };

        tracing::debug!(
            table,
            id = %id,
            change = %change.change_type,
            primary_key = %primary_key,
            "Applying row change"
        );

        match &change.change_type {
            ChangeType::Added => self.insert(table, &staging, &production, &primary_key, id),
            ChangeType::Modified => self.update(table, &staging, &production, &primary_key, id),
            ChangeType::Deleted => {
                self.store
                    .delete(&production, &primary_key, &id.to_value())
                    .map_err(|e| SyncError::DeleteRowFailed {
                        table: table.to_string(),
                        id: id.to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(format!(
                    "Entry with ID {id} deleted successfully from table {table}."
                ))
            }
            ChangeType::Unknown(label) => Err(SyncError::UnknownChangeType {
                item: format!("entry with ID {id} in table {table}"),
                change_type: label.clone(),
            }),
        }
    }

    fn insert(
        &self,
        table: &str,
        staging: &str,
        production: &str,
        primary_key: &str,
        id: &RowId,
    ) -> Result<String, SyncError> {
        let insert_failed = |reason: String| SyncError::InsertFailed {
            table: table.to_string(),
            id: id.to_string(),
            reason,
        };

        let columns = self
            .store
            .columns(staging)
            .map_err(|e| insert_failed(e.to_string()))?;
        let row = self.staging_row(table, staging, primary_key, id)?;

        let values: Vec<(String, Value)> = columns
            .into_iter()
            .filter_map(|column| {
                let value = row.get(&column)?.clone();
                Some((column, value))
            })
            .collect();
        if values.is_empty() {
            return Err(insert_failed("staging row shares no columns with its table".into()));
        }

        self.store
            .insert(production, &values)
            .map_err(|e| insert_failed(e.to_string()))?;
        Ok(format!(
            "Entry with ID {id} inserted successfully in table {table}."
        ))
    }

    fn update(
        &self,
        table: &str,
        staging: &str,
        production: &str,
        primary_key: &str,
        id: &RowId,
    ) -> Result<String, SyncError> {
        let row = self.staging_row(table, staging, primary_key, id)?;

        let values: Vec<(String, Value)> = row
            .iter()
            .filter(|(column, _)| *column != primary_key)
            .map(|(column, value)| (column.to_string(), value.clone()))
            .collect();

        self.store
            .update(production, &values, primary_key, &id.to_value())
            .map_err(|e| SyncError::UpdateFailed {
                table: table.to_string(),
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        Ok(format!(
            "Entry with ID {id} updated successfully in table {table}."
        ))
    }

    fn staging_row(
        &self,
        table: &str,
        staging: &str,
        primary_key: &str,
        id: &RowId,
    ) -> Result<Row, SyncError> {
        let not_found = || SyncError::RowNotFoundInStaging {
            table: table.to_string(),
            id: id.to_string(),
        };
        match self.store.fetch_row(staging, primary_key, &id.to_value()) {
            Ok(Some(row)) => Ok(row),
            Ok(None) => Err(not_found()),
            Err(e) => {
                tracing::warn!(table = %staging, "Staging row lookup failed: {}", e);
                Err(not_found())
            }
        }
    }
}
