//! # In-Memory Feed
//!
//! Loopback publisher with the same frame layout and prefix filtering as the
//! node's ZMQ PUB socket.

use crate::filter::TopicFilter;
use crate::subscriber::FeedSubscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use bytes::Bytes;
use shared_types::{RawFrame, Topic};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// In-memory implementation of the notification feed.
///
/// Uses `tokio::sync::broadcast`, so every subscriber sees every frame in
/// publish order. Dropping the feed closes all subscriptions.
pub struct InMemoryFeed {
    /// Broadcast sender for frames.
    sender: broadcast::Sender<RawFrame>,

    /// Next sequence number per topic, indexed like `Topic::ALL`.
    sequences: [AtomicU32; 2],

    /// Total frames published.
    frames_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryFeed {
    /// Create a feed with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a feed with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            sequences: [AtomicU32::new(0), AtomicU32::new(0)],
            frames_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to frames matching a filter.
    ///
    /// Only frames published after this call are delivered.
    #[must_use]
    pub fn subscribe(&self, filter: TopicFilter) -> FeedSubscription {
        debug!(topics = ?filter.topics, "New subscription created");
        FeedSubscription::new(self.sender.subscribe(), filter)
    }

    /// Publish a payload under `topic` with the next sequence number.
    ///
    /// # Returns
    ///
    /// The number of subscribers the frame was delivered to.
    pub fn publish(&self, topic: Topic, payload: impl Into<Bytes>) -> usize {
        let sequence = self.sequences[Self::topic_index(topic)].fetch_add(1, Ordering::Relaxed);
        let frame = RawFrame::publish(topic, payload, sequence);
        debug!(topic = %topic, sequence, "Publishing notification");
        self.publish_frame(frame)
    }

    /// Publish an arbitrary frame as-is.
    pub fn publish_frame(&self, frame: RawFrame) -> usize {
        self.frames_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(frame) {
            Ok(receivers) => receivers,
            Err(_) => {
                warn!("Frame dropped (no subscribers)");
                0
            }
        }
    }

    /// Get the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the total number of frames published.
    #[must_use]
    pub fn frames_published(&self) -> u64 {
        self.frames_published.load(Ordering::Relaxed)
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn topic_index(topic: Topic) -> usize {
        match topic {
            Topic::Block => 0,
            Topic::Transaction => 1,
        }
    }
}

impl Default for InMemoryFeed {
    fn default() -> Self {
        Self::new()
    }
}
