//! # Error Types
//!
//! Errors raised while building shared value types.

use thiserror::Error;

/// A hash string did not have the node's canonical format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashParseError {
    /// Wrong number of hex characters.
    #[error("Invalid hash length: expected {expected} hex chars, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Character outside `[0-9a-f]`.
    #[error("Invalid hash character: {0:?} (expected lowercase hex)")]
    InvalidCharacter(char),

    /// Hex decoding failed.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
