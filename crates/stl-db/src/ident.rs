//! SQL identifier quoting
//!
//! Table and column names come from change lists and schema introspection,
//! never from bound parameters, so they are validated before being spliced
//! into a statement.

use crate::{Error, Result};

/// Validate `name` and return it double-quoted.
///
/// Only ASCII letters, digits, `_` and `$` are accepted.
pub fn quote_identifier(name: &str) -> Result<String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !valid {
        return Err(Error::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    Ok(format!("\"{name}\""))
}
