//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Input shorter than the hashing window
    #[error("Input too short: need {required} bytes, got {actual}")]
    InputTooShort {
        /// Bytes the window requires
        required: usize,
        /// Bytes available
        actual: usize,
    },
}
