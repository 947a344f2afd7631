//! # Shared Bus - Notification Feed Transport
//!
//! The harness consumes a topic-multiplexed feed of multipart frames. This
//! crate defines the transport side of that feed:
//!
//! ```text
//! ┌──────────────┐   publish()    ┌──────────────┐  next_frame()  ┌──────────────┐
//! │  Publisher   │ ─────────────→ │  Feed        │ ─────────────→ │  Subscriber  │
//! │ (node / sim) │                │ (ZMQ / mem)  │  prefix filter │  (harness)   │
//! └──────────────┘                └──────────────┘                └──────────────┘
//! ```
//!
//! - `FrameSource`: the port every transport implements (one reader, ordered).
//! - `TopicFilter`: ZMQ-style prefix filter over part 0 of a frame.
//! - `InMemoryFeed`: loopback publisher used by tests and local simulation.
//!
//! ## Preconditions
//!
//! The feed is reliable, ordered and lossless. Nothing here reorders or
//! deduplicates; a gap surfaces as an error.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod filter;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use filter::TopicFilter;
pub use publisher::InMemoryFeed;
pub use subscriber::{FeedSubscription, FrameSource, SubscriptionError};

/// Frames buffered per subscriber before the subscriber counts as lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
