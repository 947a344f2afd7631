//! # Simulated Node
//!
//! A node stand-in that builds real network-serialized blocks and
//! transactions, publishes them on an `InMemoryFeed`, and reports their
//! hashes through `NodeCommands` exactly like the RPC would.
//!
//! ```text
//! generate(n) ──→ build n blocks on the tip ──→ publish BLK (batch order
//!                                                configurable)
//! sendtoaddress ──→ build tx ──→ publish TXN
//! ```
//!
//! Reported hashes are computed here with `shared_crypto` directly, never
//! through the verifier, so the two sides stay independent.
//!
//! `Fault` injects one protocol violation for negative scenarios.


use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use feed_verifier::{CommandError, NodeCommands};
use shared_bus::InMemoryFeed;
use shared_crypto::double_sha256;
use shared_types::{CanonicalHash, PayloadFormat, RawFrame, Topic};

use wire::{BlockHeader, Transaction, REGTEST_BITS};

/// Protocol violation injected into the published feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    #[default]
    None,
    /// Block payloads are cut short inside the header.
    TruncateBlocks,
    /// `generate` reports a hash that differs from the published block.
    MisreportBlockHash,
    /// Nothing is published.
    Silent,
    /// `generate` reports one hash fewer than requested.
    ShortReport,
    /// A transaction notification precedes every block notification.
    StrayTransaction,
    /// Frames go out with only the topic part.
    MissingPayload,
}

/// Ordering of notifications for a multi-block `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchOrder {
    #[default]
    Generation,
    Reversed,
    Shuffled,
}

struct ChainState {
    tip: [u8; 32],
    height: u32,
    time: u32,
    addresses: u32,
    rng: StdRng,
}

/// Node simulator publishing into a shared feed.
pub struct SimulatedNode {
    feed: Arc<InMemoryFeed>,
    format: PayloadFormat,
    order: BatchOrder,
    fault: Fault,
    state: Mutex<ChainState>,
}

impl SimulatedNode {
    /// Node with a deterministic RNG seed.
    pub fn new(feed: Arc<InMemoryFeed>, seed: u64) -> Self {
        Self {
            feed,
            format: PayloadFormat::Network,
            order: BatchOrder::default(),
            fault: Fault::None,
            state: Mutex::new(ChainState {
                tip: [0u8; 32],
                height: 0,
                time: 1_296_688_602,
                addresses: 0,
                rng: StdRng::seed_from_u64(seed),
            }),
        }
    }

    pub fn with_format(mut self, format: PayloadFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_batch_order(mut self, order: BatchOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = fault;
        self
    }

    /// Current chain height.
    pub fn height(&self) -> u32 {
        self.state.lock().height
    }

    fn publish(&self, topic: Topic, payload: Vec<u8>, digest: [u8; 32]) {
        let payload = match self.format {
            PayloadFormat::Network => payload,
            PayloadFormat::Hash => digest.to_vec(),
        };
        let payload = match (self.fault, topic) {
            (Fault::Silent, _) => return,
            (Fault::TruncateBlocks, Topic::Block) => payload[..payload.len().min(40)].to_vec(),
            _ => payload,
        };

        if self.fault == Fault::MissingPayload {
            self.feed
                .publish_frame(RawFrame::new(vec![Bytes::from_static(topic.tag())]));
            return;
        }
        self.feed.publish(topic, payload);
    }

    /// Mine one block on the current tip, returning (serialized, internal hash).
    fn mine_block(state: &mut ChainState) -> (Vec<u8>, [u8; 32]) {
        state.height += 1;
        state.time += 600;

        let coinbase = Transaction::coinbase(state.height, state.rng.gen());
        let header = BlockHeader {
            version: 0x2000_0000,
            prev_block: state.tip,
            merkle_root: double_sha256(&coinbase.serialize()),
            time: state.time,
            bits: REGTEST_BITS,
            nonce: state.rng.gen(),
        };

        let digest = double_sha256(&header.serialize());
        state.tip = digest;
        (wire::serialize_block(&header, &[coinbase]), digest)
    }

    fn ordered<T>(&self, mut items: Vec<T>, rng: &mut StdRng) -> Vec<T> {
        match self.order {
            BatchOrder::Generation => {}
            BatchOrder::Reversed => items.reverse(),
            BatchOrder::Shuffled => {
                for i in (1..items.len()).rev() {
                    items.swap(i, rng.gen_range(0..=i));
                }
            }
        }
        items
    }
}

#[async_trait]
impl NodeCommands for SimulatedNode {
    async fn generate(&self, count: usize) -> Result<Vec<CanonicalHash>, CommandError> {
        let (blocks, mut reported) = {
            let mut state = self.state.lock();
            let blocks: Vec<_> = (0..count).map(|_| Self::mine_block(&mut state)).collect();
            let reported: Vec<CanonicalHash> = blocks
                .iter()
                .map(|(_, digest)| CanonicalHash::from_internal(*digest))
                .collect();
            let blocks = self.ordered(blocks, &mut state.rng);
            (blocks, reported)
        };

        if self.fault == Fault::StrayTransaction {
            let tx = Transaction::payment(&[0xAA; 32], "stray", 1);
            self.publish(Topic::Transaction, tx.serialize(), tx.txid());
        }
        for (block, digest) in blocks {
            self.publish(Topic::Block, block, digest);
        }

        match self.fault {
            Fault::MisreportBlockHash => {
                if let Some(first) = reported.first_mut() {
                    let mut bytes = *first.as_bytes();
                    bytes[31] ^= 0x01;
                    *first = CanonicalHash::from_display_bytes(bytes);
                }
            }
            Fault::ShortReport => {
                reported.pop();
            }
            _ => {}
        }
        Ok(reported)
    }

    async fn send_to_address(
        &self,
        address: &str,
        amount: f64,
    ) -> Result<CanonicalHash, CommandError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(CommandError::Rpc {
                code: -3,
                message: "Invalid amount".to_string(),
            });
        }

        let prevout: [u8; 32] = {
            let mut state = self.state.lock();
            state.rng.gen()
        };
        let tx = Transaction::payment(&prevout, address, (amount * 1e8).round() as u64);
        let txid = tx.txid();

        self.publish(Topic::Transaction, tx.serialize(), txid);
        Ok(CanonicalHash::from_internal(txid))
    }

    async fn get_new_address(&self) -> Result<String, CommandError> {
        let mut state = self.state.lock();
        state.addresses += 1;
        Ok(format!("bcrt1qsim{:08x}", state.addresses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_verifier::compute_hash;
    use shared_bus::{FrameSource, TopicFilter};

    #[tokio::test]
    async fn test_blocks_chain_on_tip() {
        let feed = Arc::new(InMemoryFeed::new());
        let mut sub = feed.subscribe(TopicFilter::all());
        let node = SimulatedNode::new(feed.clone(), 1);

        let hashes = node.generate(2).await.unwrap();
        assert_eq!(node.height(), 2);

        let _first = sub.next_frame().await.unwrap();
        let second = sub.next_frame().await.unwrap();

        // Bytes 4..36 of the second header are the first block's hash.
        let prev = &second.part(1).unwrap()[4..36];
        assert_eq!(prev, &hashes[0].to_internal()[..]);
    }

    #[tokio::test]
    async fn test_reported_hash_matches_payload() {
        let feed = Arc::new(InMemoryFeed::new());
        let mut sub = feed.subscribe(TopicFilter::all());
        let node = SimulatedNode::new(feed.clone(), 2);

        let txid = node.send_to_address("bcrt1qdest", 0.5).await.unwrap();
        let frame = sub.next_frame().await.unwrap();
        let payload = frame.part(1).unwrap();

        assert_eq!(compute_hash(Topic::Transaction, payload).unwrap(), txid);
    }

    #[tokio::test]
    async fn test_reversed_batch_order() {
        let feed = Arc::new(InMemoryFeed::new());
        let mut sub = feed.subscribe(TopicFilter::all());
        let node = SimulatedNode::new(feed.clone(), 3).with_batch_order(BatchOrder::Reversed);

        let hashes = node.generate(3).await.unwrap();
        let frame = sub.next_frame().await.unwrap();
        let first_seen = compute_hash(Topic::Block, frame.part(1).unwrap()).unwrap();

        assert_eq!(first_seen, hashes[2]);
    }

    #[tokio::test]
    async fn test_invalid_amount_rejected() {
        let feed = Arc::new(InMemoryFeed::new());
        let node = SimulatedNode::new(feed, 4);

        assert!(matches!(
            node.send_to_address("bcrt1qdest", -1.0).await,
            Err(CommandError::Rpc { code: -3, .. })
        ));
    }
}
