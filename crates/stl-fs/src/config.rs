//! Format-agnostic configuration loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Loads configuration and change-list documents.
///
/// The format is detected from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize a document.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        let normalized = NormalizedPath::new(path);
        let extension = normalized.extension().unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }
}
