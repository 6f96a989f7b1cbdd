//! Row sync requests

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SyncError;
use crate::changes::RowId;

/// One `(table, id)` pair submitted for database sync.
///
/// Both fields are optional so that malformed submissions can still be
/// parsed and then reported per item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRowRequest {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub id: Option<RowId>,
}

impl TableRowRequest {
    pub fn new(table: impl Into<String>, id: impl Into<RowId>) -> Self {
        Self {
            table: Some(table.into()),
            id: Some(id.into()),
        }
    }

    /// Borrow the table and id, or explain what is missing.
    pub fn validate(&self) -> Result<(&str, &RowId), SyncError> {
        match (self.table.as_deref(), self.id.as_ref()) {
            (None | Some(""), _) => Err(SyncError::InvalidTableData {
                reason: "missing table".into(),
            }),
            (Some(_), None) => Err(SyncError::InvalidTableData {
                reason: "missing id".into(),
            }),
            (Some(table), Some(id)) => Ok((table, id)),
        }
    }
}

impl fmt::Display for TableRowRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.as_deref().unwrap_or("?");
        match &self.id {
            Some(id) => write!(f, "{table}:{id}"),
            None => write!(f, "{table}:?"),
        }
    }
}

/// Parses `table:id`. The id may itself contain `:`.
impl FromStr for TableRowRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (table, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected TABLE:ID, got {s:?}"))?;
        if table.is_empty() || id.is_empty() {
            return Err(format!("expected TABLE:ID, got {s:?}"));
        }
        Ok(Self::new(table, id))
    }
}
