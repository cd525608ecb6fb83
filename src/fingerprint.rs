//! Content fingerprints for cheap change detection.
//!
//! A fingerprint is an opaque digest of a file's raw bytes, compared only for
//! equality between successive polls. It is a pure function of content:
//! mtime and size are never consulted, so a no-op external save compares
//! equal while a same-length edit compares unequal.

use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, PartialEq, Eq, Debug)]
/// Opaque SHA-256 digest of file content.
///
/// Meaningful only for equality against another fingerprint of the same file;
/// never compared across files or interpreted semantically.
pub struct Fingerprint(String);

impl Fingerprint {
    #[must_use]
    /// Digests a byte buffer.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    #[must_use]
    /// Digests a file's full content.
    ///
    /// Returns `None` when the path is missing or unreadable; the caller
    /// treats that as a distinct "file absent" outcome rather than an error.
    pub fn of_file(path: &Path) -> Option<Self> {
        fs::read(path).ok().map(|bytes| Self::of_bytes(&bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "tests/fingerprint.rs"]
mod tests;
