//! Hash verification
//!
//! Recomputes the node's canonical identifier from a notification payload:
//! SHA-256d over the hashing window, byte-reversed, lowercase hex.
//!
//! | Topic | Window |
//! |-------|--------|
//! | Block | first 80 bytes (serialized header) |
//! | Transaction | whole payload |

use shared_crypto::{double_sha256, double_sha256_prefix, CryptoError, DIGEST_LEN};
use shared_types::{CanonicalHash, NotificationEnvelope, PayloadFormat, Topic};

use crate::error::VerifierError;

/// Serialized block header length.
pub const BLOCK_HEADER_LEN: usize = 80;

/// Compute the canonical hash of a full network-format payload.
///
/// Identical bytes always yield the identical hash.
pub fn compute_hash(topic: Topic, payload: &[u8]) -> Result<CanonicalHash, VerifierError> {
    let digest = match topic {
        Topic::Block => double_sha256_prefix(payload, BLOCK_HEADER_LEN).map_err(truncated)?,
        Topic::Transaction => double_sha256(payload),
    };
    Ok(CanonicalHash::from_internal(digest))
}

fn truncated(err: CryptoError) -> VerifierError {
    match err {
        CryptoError::InputTooShort { required, actual } => {
            VerifierError::TruncatedPayload { required, actual }
        }
    }
}

/// Hash verifier bound to the publisher's payload format.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashVerifier {
    format: PayloadFormat,
}

impl HashVerifier {
    /// Create a verifier for the given payload format.
    pub fn new(format: PayloadFormat) -> Self {
        Self { format }
    }

    /// Payload format this verifier expects.
    pub fn format(&self) -> PayloadFormat {
        self.format
    }

    /// Compute the canonical hash carried by `envelope`.
    ///
    /// In `Hash` format the payload is the digest itself in internal order,
    /// so it only needs reversing.
    pub fn hash_envelope(
        &self,
        envelope: &NotificationEnvelope,
    ) -> Result<CanonicalHash, VerifierError> {
        match self.format {
            PayloadFormat::Network => compute_hash(envelope.topic, &envelope.payload),
            PayloadFormat::Hash => {
                let digest: [u8; DIGEST_LEN] = match envelope.payload.len() {
                    len if len < DIGEST_LEN => {
                        return Err(VerifierError::TruncatedPayload {
                            required: DIGEST_LEN,
                            actual: len,
                        })
                    }
                    DIGEST_LEN => {
                        let mut digest = [0u8; DIGEST_LEN];
                        digest.copy_from_slice(&envelope.payload);
                        digest
                    }
                    len => {
                        return Err(VerifierError::malformed(format!(
                            "hash payload has {len} bytes, expected {DIGEST_LEN}"
                        )))
                    }
                };
                Ok(CanonicalHash::from_internal(digest))
            }
        }
    }
}
