//! Correlation of expected and observed hashes
//!
//! Single notifications are compared exactly. Batches are compared as
//! multisets: delivery order across nodes need not match the order in which
//! the RPC reported the generated blocks.

use shared_types::CanonicalHash;

use crate::error::VerifierError;

/// Which correlation check produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// One block generated, one BLK notification.
    SingleBlock,
    /// N blocks generated, N BLK notifications.
    BlockBatch,
    /// One transaction broadcast, one TXN notification.
    Transaction,
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckKind::SingleBlock => f.write_str("single-block"),
            CheckKind::BlockBatch => f.write_str("block-batch"),
            CheckKind::Transaction => f.write_str("transaction"),
        }
    }
}

/// Exact equality of one expected and one observed hash.
pub fn assert_hash_eq(
    expected: &CanonicalHash,
    actual: &CanonicalHash,
) -> Result<(), VerifierError> {
    if expected == actual {
        return Ok(());
    }
    Err(VerifierError::HashMismatch {
        expected: expected.to_hex(),
        actual: actual.to_hex(),
    })
}

/// Order-insensitive equality over the full multiset of hashes.
///
/// Both lists are sorted independently and compared entry by entry; the
/// first differing pair is reported.
pub fn assert_same_multiset(
    expected: &[CanonicalHash],
    actual: &[CanonicalHash],
) -> Result<(), VerifierError> {
    if expected.len() != actual.len() {
        return Err(VerifierError::ExpectedCountMismatch {
            requested: expected.len(),
            returned: actual.len(),
        });
    }

    let mut expected = expected.to_vec();
    let mut actual = actual.to_vec();
    expected.sort_unstable();
    actual.sort_unstable();

    expected
        .iter()
        .zip(&actual)
        .try_for_each(|(e, a)| assert_hash_eq(e, a))
}
