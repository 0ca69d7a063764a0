//! Content digests
//!
//! A [`Digest`] is the SHA-256 fingerprint of a file's byte content,
//! represented as exactly 64 lowercase hexadecimal characters. It is the
//! content handle returned by the write path and the lookup key for the
//! read path. Parsing through [`FromStr`] is the validation gate applied
//! before any storage path is derived from caller input.

use crate::error::StoreError;
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Length of a digest in hex characters (SHA-256: 32 bytes).
pub const DIGEST_HEX_LEN: usize = 64;

/// Number of leading hex characters used as the shard directory name.
pub const SHARD_PREFIX_LEN: usize = 3;

/// A validated 64-character lowercase hex SHA-256 digest.
///
/// Immutable value type; equality is byte-wise string equality. Construction
/// goes through [`Digest::compute`] or [`str::parse`], so a `Digest` in hand
/// is always well-formed.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Digest(String);

impl Digest {
    /// Compute the digest of a file's byte content.
    ///
    /// Streams the file through SHA-256; deterministic and side-effect-free
    /// beyond the read itself.
    pub fn compute(path: &Path) -> Result<Self, StoreError> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher)?;
        Ok(Self(hex::encode(hasher.finalize())))
    }

    /// The digest as a hex string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into the `(shard prefix, remainder)` pair used for blob paths.
    pub fn split(&self) -> (&str, &str) {
        self.0.split_at(SHARD_PREFIX_LEN)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = StoreError;

    /// Validate a candidate digest string: exactly 64 characters, each in
    /// `[0-9a-f]`. Uppercase hex is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DIGEST_HEX_LEN
            || !s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(StoreError::InvalidDigestFormat(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}
