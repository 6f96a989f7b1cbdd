//! SHA-256 content hashing
//!
//! Hashes are lowercase hex without a prefix, the same form the file
//! comparer stores in the file-hash table.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::Path;

use crate::{Error, Result};

/// Compute the SHA-256 digest of in-memory content.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Compute the SHA-256 digest of a file's contents.
///
/// The file is streamed through the hasher, so large uploads are not
/// loaded into memory.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn file_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).map_err(|e| Error::io(path, e))?;
    Ok(format!("{:x}", hasher.finalize()))
}
