//! File-hash index: persisting a scan inventory through the data store

use stl_db::{DataStore, Value};
use stl_fs::FileRecord;

use crate::Result;

pub const PATH_COLUMN: &str = "file_path";
pub const HASH_COLUMN: &str = "hash";

/// Insert every record whose path is not yet in `table`.
///
/// Rows already present are left untouched, hash included. Returns the
/// number of rows inserted.
pub fn record_inventory(store: &dyn DataStore, table: &str, records: &[FileRecord]) -> Result<usize> {
    let mut inserted = 0;
    for record in records {
        let path = Value::from(record.relative_path.as_str());
        if store.fetch_row(table, PATH_COLUMN, &path)?.is_some() {
            continue;
        }
        store.insert(
            table,
            &[
                (PATH_COLUMN.to_string(), path),
                (HASH_COLUMN.to_string(), Value::from(record.content_hash.as_str())),
            ],
        )?;
        inserted += 1;
    }
    tracing::info!(table, inserted, total = records.len(), "Recorded file inventory");
    Ok(inserted)
}
