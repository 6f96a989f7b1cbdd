//! Change-list data model
//!
//! The comparers hand over changes in three shapes, any of which may be
//! present at once:
//!
//! ```text
//! {
//!   "post_type_groups": { "<post_type>": [ { "changes": { "<section>": [ {type, id}, ... ] } } ] },
//!   "content_groups":   [ { "changes": { "<section>": [ {type, id}, ... ] } } ],
//!   "<table>":          [ {type, id}, ... ]
//! }
//! ```

pub mod alias;
mod ordered;
mod row_id;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use ordered::OrderedMap;
pub use row_id::RowId;

/// Kind of change recorded for a file or a row.
///
/// Labels other than `added`, `modified` and `deleted` are kept verbatim so
/// the appliers can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
    Unknown(String),
}

impl ChangeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Unknown(label) => label,
        }
    }
}

impl From<String> for ChangeType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "deleted" => Self::Deleted,
            _ => Self::Unknown(label),
        }
    }
}

impl From<&str> for ChangeType {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<ChangeType> for String {
    fn from(change: ChangeType) -> Self {
        change.as_str().to_string()
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative path -> change kind, as produced by the file comparer.
pub type FileChanges = BTreeMap<String, ChangeType>;

/// One changed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub id: RowId,
}

impl ChangeRecord {
    pub fn new(change_type: impl Into<ChangeType>, id: impl Into<RowId>) -> Self {
        Self {
            change_type: change_type.into(),
            id: id.into(),
        }
    }
}

/// A logical content group: section label -> changed rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub changes: OrderedMap<Vec<ChangeRecord>>,
}

impl Group {
    pub fn with_section(mut self, section: &str, records: Vec<ChangeRecord>) -> Self {
        self.changes.insert(section, records);
        self
    }
}

/// Database change list in all supported shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeList {
    /// Current shape: post type -> groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_type_groups: Option<OrderedMap<Vec<Group>>>,
    /// Legacy shape: flat list of groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_groups: Option<Vec<Group>>,
    /// Flat shape: table -> rows
    #[serde(flatten)]
    pub tables: OrderedMap<Vec<ChangeRecord>>,
}
