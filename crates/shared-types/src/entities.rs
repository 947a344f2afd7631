//! # Core Domain Entities
//!
//! The canonical identifier used by the node for blocks and transactions.
//!
//! The node computes a double SHA-256 digest and displays it byte-reversed
//! as lowercase hex. `CanonicalHash` stores the bytes already reversed
//! (display order), so `Display` is a plain hex encoding and `FromStr`
//! is a plain hex decoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HashParseError;

/// Length of a canonical hash in bytes.
pub const HASH_LEN: usize = 32;

/// Length of a canonical hash rendered as hex.
pub const HASH_HEX_LEN: usize = HASH_LEN * 2;

/// A 32-byte hash in internal (digest output) byte order.
pub type Hash = [u8; HASH_LEN];

/// A block or transaction identifier in display byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalHash([u8; HASH_LEN]);

impl CanonicalHash {
    /// Build from a digest in internal byte order by reversing it.
    #[must_use]
    pub fn from_internal(mut digest: Hash) -> Self {
        digest.reverse();
        Self(digest)
    }

    /// Build from bytes that are already in display order.
    #[must_use]
    pub const fn from_display_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Bytes in display order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Bytes in internal (digest) order.
    #[must_use]
    pub fn to_internal(&self) -> Hash {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }

    /// Lowercase hex, 64 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for CanonicalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for CanonicalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalHash({})", self.to_hex())
    }
}

impl FromStr for CanonicalHash {
    type Err = HashParseError;

    /// Accepts exactly 64 lowercase hex characters, the format the node's
    /// RPC returns. Uppercase is rejected rather than normalised so that a
    /// formatting change on the node side shows up as a failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HASH_HEX_LEN {
            return Err(HashParseError::InvalidLength {
                expected: HASH_HEX_LEN,
                actual: s.len(),
            });
        }
        if let Some(c) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(HashParseError::InvalidCharacter(c));
        }

        let mut bytes = [0u8; HASH_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for CanonicalHash {
    type Error = HashParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CanonicalHash> for String {
    fn from(hash: CanonicalHash) -> Self {
        hash.to_hex()
    }
}
