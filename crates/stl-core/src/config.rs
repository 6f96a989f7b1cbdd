//! Synchronizer configuration
//!
//! Loaded from TOML or JSON:
//!
//! ```toml
//! production_root = "/var/www/live"
//! staging_root = "/var/www/live/staging"   # optional
//! production_prefix = "wp_"                # optional
//! staging_prefix = "wp_staging_"           # optional
//! staging_name = "staging"                 # optional
//! database = "/var/lib/stl/site.db"        # optional, used by the CLI
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stl_fs::ConfigStore;

use crate::apply::TablePrefixes;
use crate::{Error, Result};

pub const DEFAULT_PRODUCTION_PREFIX: &str = "wp_";
pub const DEFAULT_STAGING_PREFIX: &str = "wp_staging_";
pub const DEFAULT_STAGING_NAME: &str = "staging";

fn default_production_prefix() -> String {
    DEFAULT_PRODUCTION_PREFIX.to_string()
}

fn default_staging_prefix() -> String {
    DEFAULT_STAGING_PREFIX.to_string()
}

fn default_staging_name() -> String {
    DEFAULT_STAGING_NAME.to_string()
}

/// Where the two copies of a site live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub production_root: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_root: Option<PathBuf>,
    #[serde(default = "default_production_prefix")]
    pub production_prefix: String,
    #[serde(default = "default_staging_prefix")]
    pub staging_prefix: String,
    #[serde(default = "default_staging_name")]
    pub staging_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl SyncConfig {
    /// Configuration with defaults for everything but the production root.
    pub fn new(production_root: impl Into<PathBuf>) -> Self {
        Self {
            production_root: production_root.into(),
            staging_root: None,
            production_prefix: default_production_prefix(),
            staging_prefix: default_staging_prefix(),
            staging_name: default_staging_name(),
            database: None,
        }
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(ConfigStore::new().load(path)?)
    }

    pub fn with_staging_root(mut self, staging_root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(staging_root.into());
        self
    }

    pub fn with_prefixes(mut self, staging: &str, production: &str) -> Self {
        self.staging_prefix = staging.to_string();
        self.production_prefix = production.to_string();
        self
    }

    /// Staging root; `<production_root>/<staging_name>` unless set.
    pub fn staging_root(&self) -> PathBuf {
        self.staging_root
            .clone()
            .unwrap_or_else(|| self.snapshot_dir())
    }

    /// Directory a staging snapshot is copied into.
    pub fn snapshot_dir(&self) -> PathBuf {
        self.production_root.join(&self.staging_name)
    }

    pub fn prefixes(&self) -> TablePrefixes {
        TablePrefixes::new(&self.staging_prefix, &self.production_prefix)
    }

    /// Table holding the file-hash inventory.
    pub fn filehash_table(&self) -> String {
        format!(
            "{}{}_stl_filehash",
            self.production_prefix, self.staging_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn minimal_toml_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stl.toml");
        std::fs::write(&path, "production_root = \"/srv/live\"\n").unwrap();

        let config = SyncConfig::load(&path).unwrap();
        assert_eq!(config, SyncConfig::new("/srv/live"));
        assert_eq!(config.staging_root(), PathBuf::from("/srv/live/staging"));
        assert_eq!(config.filehash_table(), "wp_staging_stl_filehash");
        assert_eq!(config.prefixes().staging_table("posts"), "wp_staging_posts");
    }

    #[test]
    fn explicit_values_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stl.json");
        std::fs::write(
            &path,
            r#"{"production_root": "/a", "staging_root": "/b", "production_prefix": "p_",
                "staging_prefix": "s_", "staging_name": "dev"}"#,
        )
        .unwrap();

        let config = SyncConfig::load(&path).unwrap();
        assert_eq!(config.staging_root(), PathBuf::from("/b"));
        assert_eq!(config.prefixes().production_table("options"), "p_options");
        assert_eq!(config.filehash_table(), "p_dev_stl_filehash");
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let err = SyncConfig::load(Path::new("/nonexistent/stl.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}
