//! The data-store seam used by the row applier and the file-hash index

use crate::{Result, Row, Value};

/// Operations a row sync needs from a relational store.
///
/// Table names passed in are fully prefixed (`wp_posts`,
/// `wp_staging_posts`). Every call is independent; there is no
/// transaction spanning calls.
pub trait DataStore {
    /// Name of the table's primary-key column, or `None` when the table has
    /// no primary key (or does not exist). Composite keys report their
    /// first column.
    fn primary_key(&self, table: &str) -> Result<Option<String>>;

    /// Column names of `table` in definition order.
    fn columns(&self, table: &str) -> Result<Vec<String>>;

    /// Read the first row whose `column` equals `key`.
    fn fetch_row(&self, table: &str, column: &str, key: &Value) -> Result<Option<Row>>;

    /// Insert one row. Returns the number of rows written.
    fn insert(&self, table: &str, values: &[(String, Value)]) -> Result<usize>;

    /// Set `values` on every row whose `key_column` equals `key`.
    /// Returns the number of rows matched.
    fn update(
        &self,
        table: &str,
        values: &[(String, Value)],
        key_column: &str,
        key: &Value,
    ) -> Result<usize>;

    /// Delete every row whose `key_column` equals `key`.
    /// Returns the number of rows removed.
    fn delete(&self, table: &str, key_column: &str, key: &Value) -> Result<usize>;
}

impl<T: DataStore + ?Sized> DataStore for &T {
    fn primary_key(&self, table: &str) -> Result<Option<String>> {
        (**self).primary_key(table)
    }

    fn columns(&self, table: &str) -> Result<Vec<String>> {
        (**self).columns(table)
    }

    fn fetch_row(&self, table: &str, column: &str, key: &Value) -> Result<Option<Row>> {
        (**self).fetch_row(table, column, key)
    }

    fn insert(&self, table: &str, values: &[(String, Value)]) -> Result<usize> {
        (**self).insert(table, values)
    }

    fn update(
        &self,
        table: &str,
        values: &[(String, Value)],
        key_column: &str,
        key: &Value,
    ) -> Result<usize> {
        (**self).update(table, values, key_column, key)
    }

    fn delete(&self, table: &str, key_column: &str, key: &Value) -> Result<usize> {
        (**self).delete(table, key_column, key)
    }
}
