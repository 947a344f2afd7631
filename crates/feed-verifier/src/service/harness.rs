//! Correlation Harness
//!
//! Drives the node through its command interface and checks that every
//! resulting notification carries the hash the node reported.
//!
//! ```text
//! command ──→ node ──→ feed ──→ TopicSubscriber ──→ decode ──→ hash
//!    │                                                           │
//!    └──────────── expected hash(es) ──────── compare ←──────────┘
//! ```
//!
//! One action at a time: a check issues its command, drains exactly the
//! notifications it caused, and only then returns.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use feed_telemetry::log_notification;
use shared_bus::FrameSource;
use shared_types::{CanonicalHash, Topic};
use tracing::{error, info, info_span, Instrument};

use crate::config::HarnessConfig;
use crate::domain::{assert_hash_eq, assert_same_multiset, CheckKind, HashVerifier};
use crate::error::VerifierError;
use crate::metrics::VerificationMetrics;
use crate::ports::{CheckOutcome, FeedVerifierApi, NodeCommands, VerificationReport};
use crate::service::TopicSubscriber;

/// Correlation harness over an injected command interface and subscription.
pub struct CorrelationHarness<C: NodeCommands, S: FrameSource> {
    /// Node whose feed is subscribed
    primary: C,
    /// Optional second node that drives relayed activity
    peer: Option<C>,
    subscriber: TopicSubscriber<S>,
    verifier: HashVerifier,
    metrics: Arc<VerificationMetrics>,
    batch_size: usize,
    send_amount: f64,
}

impl<C: NodeCommands, S: FrameSource> CorrelationHarness<C, S> {
    /// Create a harness driving `primary` and reading from `subscriber`.
    pub fn new(primary: C, subscriber: TopicSubscriber<S>, config: &HarnessConfig) -> Self {
        let metrics = subscriber.metrics().clone();
        Self {
            primary,
            peer: None,
            subscriber,
            verifier: HashVerifier::new(config.payload_format),
            metrics,
            batch_size: config.batch_size,
            send_amount: config.send_amount,
        }
    }

    /// Drive batch blocks and the transaction through a second node.
    ///
    /// The receiving address still comes from the primary, so the feed
    /// observes the transaction after it is relayed.
    pub fn with_peer(mut self, peer: C) -> Self {
        self.peer = Some(peer);
        self
    }

    pub fn metrics(&self) -> &Arc<VerificationMetrics> {
        &self.metrics
    }

    /// Node that issues relayed actions: the peer if configured.
    fn driver(&self) -> &C {
        self.peer.as_ref().unwrap_or(&self.primary)
    }

    /// Receive one notification of `expected` topic and hash it.
    async fn receive_hash(&mut self, expected: Topic) -> Result<CanonicalHash, VerifierError> {
        let envelope = self.subscriber.receive_envelope().await?;
        if envelope.topic != expected {
            return Err(VerifierError::UnexpectedTopic {
                expected,
                actual: envelope.topic,
            });
        }

        let hash = self.verifier.hash_envelope(&envelope)?;
        log_notification!(debug, "Payload hashed", envelope.topic, hash, sequence = ?envelope.sequence);
        Ok(hash)
    }

    fn expect_count(requested: usize, returned: usize) -> Result<(), VerifierError> {
        if requested == returned {
            return Ok(());
        }
        Err(VerifierError::ExpectedCountMismatch {
            requested,
            returned,
        })
    }

    fn record_outcome(&self, result: Result<(), VerifierError>) -> Result<(), VerifierError> {
        if let Err(VerifierError::HashMismatch { expected, actual }) = &result {
            self.metrics.record_mismatch();
            error!(%expected, %actual, "Hash mismatch");
        }
        result
    }
}

#[async_trait]
impl<C, S> FeedVerifierApi for CorrelationHarness<C, S>
where
    C: NodeCommands,
    S: FrameSource,
{
    async fn check_single_block(&mut self) -> Result<CheckOutcome, VerifierError> {
        let started = Instant::now();
        let expected = self.primary.generate(1).await?;
        Self::expect_count(1, expected.len())?;

        let actual = self.receive_hash(Topic::Block).await?;
        self.record_outcome(assert_hash_eq(&expected[0], &actual))?;
        self.metrics.record_verified(1);

        log_notification!(info, "Block notification verified", Topic::Block, actual);
        Ok(CheckOutcome {
            kind: CheckKind::SingleBlock,
            verified: vec![actual],
            elapsed: started.elapsed(),
        })
    }

    async fn check_block_batch(&mut self, count: usize) -> Result<CheckOutcome, VerifierError> {
        let started = Instant::now();
        let expected = self.driver().generate(count).await?;
        Self::expect_count(count, expected.len())?;

        let mut actual = Vec::with_capacity(count);
        for _ in 0..count {
            actual.push(self.receive_hash(Topic::Block).await?);
        }

        self.record_outcome(assert_same_multiset(&expected, &actual))?;
        self.metrics.record_verified(count as u64);

        info!(count, "Block batch verified");
        Ok(CheckOutcome {
            kind: CheckKind::BlockBatch,
            verified: actual,
            elapsed: started.elapsed(),
        })
    }

    async fn check_transaction(&mut self, amount: f64) -> Result<CheckOutcome, VerifierError> {
        let started = Instant::now();
        let address = self.primary.get_new_address().await?;
        let expected = self.driver().send_to_address(&address, amount).await?;

        let actual = self.receive_hash(Topic::Transaction).await?;
        self.record_outcome(assert_hash_eq(&expected, &actual))?;
        self.metrics.record_verified(1);

        log_notification!(info, "Transaction notification verified", Topic::Transaction, actual, %address);
        Ok(CheckOutcome {
            kind: CheckKind::Transaction,
            verified: vec![actual],
            elapsed: started.elapsed(),
        })
    }

    async fn run_all(&mut self) -> Result<VerificationReport, VerifierError> {
        let started = Instant::now();
        let batch_size = self.batch_size;
        let send_amount = self.send_amount;

        let single = self
            .check_single_block()
            .instrument(info_span!("check", kind = %CheckKind::SingleBlock))
            .await?;
        let batch = self
            .check_block_batch(batch_size)
            .instrument(info_span!("check", kind = %CheckKind::BlockBatch))
            .await?;
        let transaction = self
            .check_transaction(send_amount)
            .instrument(info_span!("check", kind = %CheckKind::Transaction))
            .await?;

        let report = VerificationReport {
            checks: vec![single, batch, transaction],
            metrics: self.metrics.snapshot(),
            elapsed: started.elapsed(),
        };
        info!(
            hashes = report.hashes_verified(),
            frames = report.metrics.frames_received,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "All checks passed"
        );
        Ok(report)
    }
}
