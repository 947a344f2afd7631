//! Counters for a verification run
//!
//! Shared between the subscriber (frames in) and the harness (hashes
//! checked). Reported in the final `VerificationReport`; there is no
//! exporter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for one harness run.
#[derive(Debug, Default)]
pub struct VerificationMetrics {
    /// Frames delivered by the transport
    pub frames_received: AtomicU64,
    /// Frames that decoded into an envelope
    pub envelopes_decoded: AtomicU64,
    /// Hashes that matched their expected value
    pub hashes_verified: AtomicU64,
    /// Failed correlations
    pub mismatches: AtomicU64,
}

impl VerificationMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decoded(&self) {
        self.envelopes_decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_verified(&self, count: u64) {
        self.hashes_verified.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_mismatch(&self) {
        self.mismatches.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            envelopes_decoded: self.envelopes_decoded.load(Ordering::Relaxed),
            hashes_verified: self.hashes_verified.load(Ordering::Relaxed),
            mismatches: self.mismatches.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of `VerificationMetrics`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub frames_received: u64,
    pub envelopes_decoded: u64,
    pub hashes_verified: u64,
    pub mismatches: u64,
}
