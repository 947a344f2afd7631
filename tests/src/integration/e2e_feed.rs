//! # End-to-End Feed Verification
//!
//! Runs the correlation harness against `SimulatedNode` over an in-memory
//! feed:
//!
//! ```text
//! CorrelationHarness ──NodeCommands──→ SimulatedNode
//!         ↑                                  │ publish
//!   TopicSubscriber ←── FeedSubscription ←── InMemoryFeed
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: single block, batch of 10, one transaction
//! 2. **Ordering**: reversed and shuffled batch delivery
//! 3. **Violations**: each fatal error kind surfaces with its values

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
use feed_verifier::{
    CheckKind, CorrelationHarness, FeedVerifierApi, HarnessConfig, HashVerifier, NodeCommands,
    TopicSubscriber, VerifierError,
};

#[cfg(test)]
use shared_bus::{FeedSubscription, InMemoryFeed, TopicFilter};

#[cfg(test)]
use shared_types::{PayloadFormat, Topic};

#[cfg(test)]
use crate::simulation::{BatchOrder, Fault, SimulatedNode};

#[cfg(test)]
type Harness = CorrelationHarness<SimulatedNode, FeedSubscription>;

/// Subscribe first, then hand the node the same feed.
#[cfg(test)]
fn setup(configure: impl FnOnce(SimulatedNode) -> SimulatedNode, config: &HarnessConfig) -> Harness {
    let feed = Arc::new(InMemoryFeed::new());
    let subscriber = TopicSubscriber::new(feed.subscribe(TopicFilter::all()), config.receive_timeout);
    let node = configure(SimulatedNode::new(feed, 42));
    CorrelationHarness::new(node, subscriber, config)
}

#[cfg(test)]
fn config() -> HarnessConfig {
    HarnessConfig::default().with_receive_timeout(Some(Duration::from_secs(5)))
}

// =============================================================================
// HAPPY PATH
// =============================================================================

#[tokio::test]
async fn test_single_block_hash_matches() {
    let mut harness = setup(|n| n, &config());

    let outcome = harness.check_single_block().await.unwrap();
    assert_eq!(outcome.kind, CheckKind::SingleBlock);
    assert_eq!(outcome.verified.len(), 1);
}

#[tokio::test]
async fn test_batch_of_ten_matches_as_multiset() {
    let mut harness = setup(|n| n.with_batch_order(BatchOrder::Reversed), &config());

    let outcome = harness.check_block_batch(10).await.unwrap();
    assert_eq!(outcome.verified.len(), 10);
}

#[tokio::test]
async fn test_transaction_hash_matches() {
    let mut harness = setup(|n| n, &config());

    let outcome = harness.check_transaction(1.0).await.unwrap();
    assert_eq!(outcome.kind, CheckKind::Transaction);
}

#[tokio::test]
async fn test_run_all_reports_every_check() {
    let mut harness = setup(|n| n, &config());

    let report = harness.run_all().await.unwrap();
    let kinds: Vec<_> = report.checks.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![CheckKind::SingleBlock, CheckKind::BlockBatch, CheckKind::Transaction]
    );
    assert_eq!(report.hashes_verified(), 12);
    assert_eq!(report.metrics.frames_received, 12);
    assert_eq!(report.metrics.mismatches, 0);
}

#[tokio::test]
async fn test_hash_payload_format() {
    let config = config().with_payload_format(PayloadFormat::Hash);
    let mut harness = setup(|n| n.with_format(PayloadFormat::Hash), &config);

    harness.run_all().await.unwrap();
}

#[tokio::test]
async fn test_peer_drives_relayed_actions() {
    let feed = Arc::new(InMemoryFeed::new());
    let config = config().with_batch_size(4);
    let subscriber = TopicSubscriber::new(feed.subscribe(TopicFilter::all()), config.receive_timeout);

    let primary = SimulatedNode::new(feed.clone(), 1);
    let peer = SimulatedNode::new(feed.clone(), 2).with_batch_order(BatchOrder::Shuffled);
    let mut harness = CorrelationHarness::new(primary, subscriber, &config).with_peer(peer);

    let report = harness.run_all().await.unwrap();
    assert_eq!(report.hashes_verified(), 1 + 4 + 1);
}

// =============================================================================
// ORDERING
// =============================================================================

#[tokio::test]
async fn test_shuffled_batch_still_matches() {
    for seed in 0..5 {
        let feed = Arc::new(InMemoryFeed::new());
        let subscriber = TopicSubscriber::new(feed.subscribe(TopicFilter::all()), None);
        let node = SimulatedNode::new(feed, seed).with_batch_order(BatchOrder::Shuffled);
        let mut harness = CorrelationHarness::new(node, subscriber, &config());

        harness.check_block_batch(7).await.unwrap();
    }
}

#[tokio::test]
async fn test_generation_order_delivers_in_chain_order() {
    let feed = Arc::new(InMemoryFeed::new());
    let mut subscriber = TopicSubscriber::new(feed.subscribe(TopicFilter::all()), None);
    let node = SimulatedNode::new(feed, 9);

    let reported = node.generate(5).await.unwrap();
    let verifier = HashVerifier::new(PayloadFormat::Network);

    for (index, expected) in reported.iter().enumerate() {
        let envelope = subscriber.receive_envelope().await.unwrap();
        assert_eq!(envelope.sequence, Some(index as u32));
        assert_eq!(&verifier.hash_envelope(&envelope).unwrap(), expected);
    }
}

// =============================================================================
// VIOLATIONS
// =============================================================================

#[tokio::test]
async fn test_truncated_block_is_reported() {
    let mut harness = setup(|n| n.with_fault(Fault::TruncateBlocks), &config());

    match harness.check_single_block().await {
        Err(VerifierError::TruncatedPayload { required, actual }) => {
            assert_eq!(required, 80);
            assert_eq!(actual, 40);
        }
        other => panic!("expected TruncatedPayload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_misreported_hash_is_a_mismatch() {
    let mut harness = setup(|n| n.with_fault(Fault::MisreportBlockHash), &config());

    match harness.check_single_block().await {
        Err(VerifierError::HashMismatch { expected, actual }) => {
            assert_ne!(expected, actual);
            assert_eq!(expected.len(), 64);
            assert_eq!(actual.len(), 64);
        }
        other => panic!("expected HashMismatch, got {other:?}"),
    }
    assert_eq!(harness.metrics().snapshot().mismatches, 1);
}

#[tokio::test]
async fn test_misreported_batch_member_is_a_mismatch() {
    let mut harness = setup(|n| n.with_fault(Fault::MisreportBlockHash), &config());

    assert!(matches!(
        harness.check_block_batch(10).await,
        Err(VerifierError::HashMismatch { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_silent_node_times_out() {
    let mut harness = setup(|n| n.with_fault(Fault::Silent), &config());

    assert!(matches!(
        harness.check_single_block().await,
        Err(VerifierError::NotificationTimeout { .. })
    ));
}

#[tokio::test]
async fn test_short_report_is_a_count_mismatch() {
    let mut harness = setup(|n| n.with_fault(Fault::ShortReport), &config());

    match harness.check_block_batch(10).await {
        Err(VerifierError::ExpectedCountMismatch {
            requested,
            returned,
        }) => {
            assert_eq!(requested, 10);
            assert_eq!(returned, 9);
        }
        other => panic!("expected ExpectedCountMismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stray_transaction_is_unexpected() {
    let mut harness = setup(|n| n.with_fault(Fault::StrayTransaction), &config());

    assert!(matches!(
        harness.check_single_block().await,
        Err(VerifierError::UnexpectedTopic {
            expected: Topic::Block,
            actual: Topic::Transaction,
        })
    ));
}

#[tokio::test]
async fn test_missing_payload_is_malformed() {
    let mut harness = setup(|n| n.with_fault(Fault::MissingPayload), &config());

    assert!(matches!(
        harness.check_transaction(1.0).await,
        Err(VerifierError::MalformedEnvelope { .. })
    ));
}

#[tokio::test]
async fn test_closed_feed_is_reported() {
    let feed = Arc::new(InMemoryFeed::new());
    let subscriber = TopicSubscriber::new(feed.subscribe(TopicFilter::all()), None);
    // Node publishes into a different feed; the subscribed one goes away.
    let node = SimulatedNode::new(Arc::new(InMemoryFeed::new()), 7);
    drop(feed);
    let mut harness = CorrelationHarness::new(node, subscriber, &config());

    assert!(matches!(
        harness.check_single_block().await,
        Err(VerifierError::ConnectionClosed)
    ));
}

#[tokio::test]
async fn test_hash_format_mismatch_detected() {
    // Verifier expects digests but the node publishes full blocks.
    let config = config().with_payload_format(PayloadFormat::Hash);
    let mut harness = setup(|n| n, &config);

    assert!(matches!(
        harness.check_single_block().await,
        Err(VerifierError::MalformedEnvelope { .. })
    ));
}
