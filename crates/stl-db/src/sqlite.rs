//! SQLite-backed [`DataStore`]

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::{DataStore, Result, Row, Value, quote_identifier};

/// A [`DataStore`] over a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// The underlying connection, for schema setup and inspection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run one or more `;`-separated statements.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn table_info(&self, table: &str) -> Result<Vec<(String, i64)>> {
        // Validated even though it is bound, so a bad name fails loudly
        // instead of looking like an empty table.
        quote_identifier(table)?;
        let mut stmt = self
            .conn
            .prepare("SELECT name, pk FROM pragma_table_info(?1) ORDER BY cid")?;
        let rows = stmt
            .query_map(params![table], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(String, i64)>>>()?;
        Ok(rows)
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl DataStore for SqliteStore {
    fn primary_key(&self, table: &str) -> Result<Option<String>> {
        let key = self
            .table_info(table)?
            .into_iter()
            .filter(|(_, pk)| *pk > 0)
            .min_by_key(|(_, pk)| *pk)
            .map(|(name, _)| name);
        tracing::debug!(table, primary_key = ?key, "Discovered primary key");
        Ok(key)
    }

    fn columns(&self, table: &str) -> Result<Vec<String>> {
        Ok(self
            .table_info(table)?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    fn fetch_row(&self, table: &str, column: &str, key: &Value) -> Result<Option<Row>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?1 LIMIT 1",
            quote_identifier(table)?,
            quote_identifier(column)?
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();

        let row = stmt
            .query_row(params![key], |row| {
                names
                    .iter()
                    .enumerate()
                    .map(|(idx, name)| Ok((name.clone(), Value::from(row.get_ref(idx)?))))
                    .collect::<rusqlite::Result<Row>>()
            })
            .optional()?;
        Ok(row)
    }

    fn insert(&self, table: &str, values: &[(String, Value)]) -> Result<usize> {
        let columns = values
            .iter()
            .map(|(name, _)| quote_identifier(name))
            .collect::<Result<Vec<_>>>()?;
        let placeholders = (1..=values.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(table)?,
            columns.join(", "),
            placeholders.join(", ")
        );
        tracing::debug!(%sql, "Executing insert");
        let written = self
            .conn
            .execute(&sql, params_from_iter(values.iter().map(|(_, v)| v)))?;
        Ok(written)
    }

    fn update(
        &self,
        table: &str,
        values: &[(String, Value)],
        key_column: &str,
        key: &Value,
    ) -> Result<usize> {
        if values.is_empty() {
            return Ok(0);
        }
        let sets = values
            .iter()
            .enumerate()
            .map(|(idx, (name, _))| Ok(format!("{} = ?{}", quote_identifier(name)?, idx + 1)))
            .collect::<Result<Vec<_>>>()?;
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            quote_identifier(table)?,
            sets.join(", "),
            quote_identifier(key_column)?,
            values.len() + 1
        );
        tracing::debug!(%sql, "Executing update");
        let params = values.iter().map(|(_, v)| v).chain(std::iter::once(key));
        let matched = self.conn.execute(&sql, params_from_iter(params))?;
        Ok(matched)
    }

    fn delete(&self, table: &str, key_column: &str, key: &Value) -> Result<usize> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1",
            quote_identifier(table)?,
            quote_identifier(key_column)?
        );
        tracing::debug!(%sql, "Executing delete");
        let removed = self.conn.execute(&sql, params![key])?;
        Ok(removed)
    }
}
