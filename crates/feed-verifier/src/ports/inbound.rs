//! Inbound Ports (Driving Ports)
//!
//! The API a caller (the CLI binary, a test) uses to drive verification.

use async_trait::async_trait;
use shared_types::CanonicalHash;
use std::time::Duration;

use crate::domain::CheckKind;
use crate::error::VerifierError;
use crate::metrics::MetricsSnapshot;

/// Result of one passed correlation check
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Which check ran
    pub kind: CheckKind,
    /// Hashes confirmed through the feed, in delivery order
    pub verified: Vec<CanonicalHash>,
    /// Wall time from issuing the command to the last comparison
    pub elapsed: Duration,
}

/// Summary of a full `run_all`
#[derive(Debug, Clone)]
pub struct VerificationReport {
    /// Outcomes in execution order
    pub checks: Vec<CheckOutcome>,
    /// Counters at the end of the run
    pub metrics: MetricsSnapshot,
    /// Total wall time
    pub elapsed: Duration,
}

impl VerificationReport {
    /// Total hashes confirmed across all checks
    pub fn hashes_verified(&self) -> usize {
        self.checks.iter().map(|c| c.verified.len()).sum()
    }
}

/// Feed verification API (Driving Port)
///
/// Checks are strictly sequential: each one issues a single control action
/// and drains exactly the notifications it caused before returning.
#[async_trait]
pub trait FeedVerifierApi: Send {
    /// Generate one block; its BLK notification must carry the same hash.
    async fn check_single_block(&mut self) -> Result<CheckOutcome, VerifierError>;

    /// Generate `count` blocks; the multiset of BLK notification hashes must
    /// equal the multiset of generated hashes.
    async fn check_block_batch(&mut self, count: usize) -> Result<CheckOutcome, VerifierError>;

    /// Broadcast one transaction; its TXN notification must carry the same hash.
    async fn check_transaction(&mut self, amount: f64) -> Result<CheckOutcome, VerifierError>;

    /// Run the three checks in order, stopping at the first failure.
    async fn run_all(&mut self) -> Result<VerificationReport, VerifierError>;
}
