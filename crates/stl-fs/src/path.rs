//! Normalized, forward-slash paths
//!
//! Inventory paths and change-map keys are always relative to a site root
//! and always use `/`, regardless of the platform the scan ran on.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A path normalized to use forward slashes internally.
///
/// Converted to a platform-native `PathBuf` only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present. Dotfiles such as `.htaccess` have none.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("C:\\site\\wp-content\\a.txt", "C:/site/wp-content/a.txt")]
    #[case("/var/www/a.txt", "/var/www/a.txt")]
    #[case("wp-content\\uploads/x.png", "wp-content/uploads/x.png")]
    fn backslashes_become_forward_slashes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(NormalizedPath::new(input).as_str(), expected);
    }

    #[test]
    fn dotfile_has_no_extension() {
        assert_eq!(NormalizedPath::new("a/.htaccess").extension(), None);
        assert_eq!(NormalizedPath::new("a/cache.php").extension(), Some("php"));
    }
}
