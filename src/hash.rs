//! content hash newtype
//!
//! every persistent object in the graph is identified by a SHA-1 hash of a
//! canonical byte string built per object kind (see `object::blob`,
//! `object::tree`, `object::commit`). this module only owns the hash value
//! itself: parsing, formatting, and the underlying digest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::Error;

/// a SHA-1 content hash, stored as raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Hash([u8; 20]);



impl Hash {
    /// hash of the empty byte string, occasionally useful in tests.
    pub const ZERO: Hash = Hash([0u8; 20]);

    /// hash arbitrary bytes directly (used for blob content).
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(bytes);
        Self(hasher.finalize().into())
    }

    /// hash a UTF-8 string built from one of the object-kind formulas.
    pub fn of_str(s: &str) -> Self {
        Self::of(s.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s).map_err(|_| Error::Malformed(format!("invalid hash hex: {s}")))?;
        if bytes.len() != 20 {
            return Err(Error::Malformed(format!(
                "hash must be 20 bytes, got {}: {s}",
                bytes.len()
            )));
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Hash {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        Self::from_hex(&s)
    }
}

impl From<Hash> for String {
    fn from(h: Hash) -> String {
        h.to_hex()
    }
}

/// format an optional hash per the wire contract: present hashes serialize
/// as their hex string, absent hashes serialize as the empty string. used
/// when building the byte strings fed into `Hash::of_str` for commits and
/// internal nodes when computing commit and internal-node hashes.
pub fn hex_or_empty(hash: Option<&Hash>) -> String {
    match hash {
        Some(h) => h.to_hex(),
        None => String::new(),
    }
}
