//! # Feed Verifier
//!
//! Checks a node's block/transaction notification feed against the node's
//! own command interface.
//!
//! ## Pipeline
//!
//! ```text
//! NodeCommands ──generate / sendtoaddress──→ node
//!                                              │ publishes
//!                                              ↓
//! FrameSource ──→ TopicSubscriber ──→ decode_frame ──→ HashVerifier
//!                                                          │
//!                       expected hashes ──→ correlation ←──┘
//! ```
//!
//! ## Checks
//!
//! 1. Single block: one BLK notification, hash equal to `generate(1)`.
//! 2. Block batch: N BLK notifications, same multiset as `generate(N)`.
//! 3. Transaction: one TXN notification, hash equal to `sendtoaddress`.
//!
//! ## Architecture
//!
//! - `domain/`: envelope decoding, hashing, comparison. Pure.
//! - `ports/`: `FeedVerifierApi` (driving) and `NodeCommands` (driven).
//! - `service/`: `TopicSubscriber` and `CorrelationHarness`.
//! - `adapters/`: ZeroMQ SUB socket and JSON-RPC client.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export main types
pub use config::HarnessConfig;
pub use domain::{
    assert_hash_eq, assert_same_multiset, compute_hash, decode_frame, CheckKind, HashVerifier,
    BLOCK_HEADER_LEN,
};
pub use error::{CommandError, VerifierError};
pub use metrics::{MetricsSnapshot, VerificationMetrics};
pub use ports::{CheckOutcome, FeedVerifierApi, NodeCommands, VerificationReport};
pub use service::{CorrelationHarness, TopicSubscriber};
