//! # SHA-256d Hashing
//!
//! The node names blocks and transactions by `SHA256(SHA256(bytes))`.
//! For blocks only the 80-byte header is hashed; callers pick the window
//! with [`double_sha256_prefix`].

use sha2::{Digest, Sha256};

use crate::errors::CryptoError;

/// Digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// SHA-256d output (internal byte order).
pub type Hash = [u8; DIGEST_LEN];

/// Stateful SHA-256d hasher.
///
/// Feeds the outer SHA-256 with the finalized inner digest.
#[derive(Clone, Default)]
pub struct Sha256dHasher {
    inner: Sha256,
}

impl Sha256dHasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return the double digest.
    pub fn finalize(self) -> Hash {
        let first = self.inner.finalize();
        Sha256::digest(first).into()
    }
}

/// Hash data with SHA-256d (one-shot).
pub fn double_sha256(data: &[u8]) -> Hash {
    Sha256::digest(Sha256::digest(data)).into()
}

/// Hash the first `window` bytes of `data`.
///
/// Bytes past the window do not influence the result.
pub fn double_sha256_prefix(data: &[u8], window: usize) -> Result<Hash, CryptoError> {
    let prefix = data.get(..window).ok_or(CryptoError::InputTooShort {
        required: window,
        actual: data.len(),
    })?;
    Ok(double_sha256(prefix))
}
