//! Row identifiers with an explicit equality policy
//!
//! Ids reach us as JSON strings or integers. Two ids are equal when their
//! canonical forms are equal: a trimmed value that parses as `i64` becomes
//! that integer (`"007"`, `"7"` and `7` are the same id), anything else is
//! compared as the exact string.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use stl_db::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Canonical {
    Integer(i64),
    Text(String),
}

/// Identifier of a row inside a change list or a sync request.
#[derive(Debug, Clone)]
pub struct RowId {
    raw: String,
    canonical: Canonical,
}

impl RowId {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let canonical = match raw.trim().parse::<i64>() {
            Ok(i) => Canonical::Integer(i),
            Err(_) => Canonical::Text(raw.clone()),
        };
        Self { raw, canonical }
    }

    /// The id exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The value bound to SQL when matching this id against a key column.
    ///
    /// Always the raw text: key columns compare by exact equality, so a
    /// TEXT key `"007"` is only reachable as `"007"`. INTEGER key columns
    /// still match because SQLite applies their numeric affinity.
    pub fn to_value(&self) -> Value {
        Value::Text(self.raw.clone())
    }
}

impl PartialEq for RowId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for RowId {}

impl Hash for RowId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        Self::new(value.to_string())
    }
}

impl From<i32> for RowId {
    fn from(value: i32) -> Self {
        Self::new(value.to_string())
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for RowId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.canonical {
            Canonical::Integer(i) if i.to_string() == self.raw => serializer.serialize_i64(i),
            _ => serializer.serialize_str(&self.raw),
        }
    }
}

struct RowIdVisitor;

impl Visitor<'_> for RowIdVisitor {
    type Value = RowId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer row id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RowId, E> {
        Ok(RowId::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RowId, E> {
        Ok(RowId::new(v.to_string()))
    }

    /// Integral floats such as `5.0` are the integer id; any other float is
    /// kept as its text so only that record fails to match.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RowId, E> {
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
            Ok(RowId::from(v as i64))
        } else {
            Ok(RowId::new(v.to_string()))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RowId, E> {
        Ok(RowId::new(v))
    }
}

impl<'de> Deserialize<'de> for RowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RowIdVisitor)
    }
}
