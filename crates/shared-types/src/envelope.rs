//! # Notification Envelope
//!
//! Wire-level and decoded shapes of one notification.
//!
//! ## Wire Format
//!
//! ```text
//! part 0: topic tag     "BLK" | "TXN"   (3 ASCII bytes)
//! part 1: payload       serialized block or transaction
//! part 2: sequence      optional counter, u32 little-endian when 4 bytes
//! ```

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Notification category used to filter the multiplexed feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// A block was connected to the chain tip.
    Block,
    /// A transaction was accepted and relayed.
    Transaction,
}

impl Topic {
    /// Every topic the feed publishes.
    pub const ALL: [Topic; 2] = [Topic::Block, Topic::Transaction];

    /// The 3-byte wire tag for this topic.
    #[must_use]
    pub const fn tag(self) -> &'static [u8; 3] {
        match self {
            Topic::Block => b"BLK",
            Topic::Transaction => b"TXN",
        }
    }

    /// Map a wire tag back to a topic.
    #[must_use]
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag().as_slice() == tag)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Block => f.write_str("BLK"),
            Topic::Transaction => f.write_str("TXN"),
        }
    }
}

/// How the publisher encodes payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    /// Full network serialization of the block or transaction.
    #[default]
    Network,
    /// Only the 32-byte digest, internal byte order.
    Hash,
}

impl FromStr for PayloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "network" => Ok(Self::Network),
            "hash" => Ok(Self::Hash),
            other => Err(format!("unknown payload format: {other}")),
        }
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadFormat::Network => f.write_str("network"),
            PayloadFormat::Hash => f.write_str("hash"),
        }
    }
}

/// One multipart message exactly as the transport delivered it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    parts: Vec<Bytes>,
}

impl RawFrame {
    /// Wrap the received parts.
    #[must_use]
    pub fn new(parts: Vec<Bytes>) -> Self {
        Self { parts }
    }

    /// Build the three-part frame a publisher sends.
    #[must_use]
    pub fn publish(topic: Topic, payload: impl Into<Bytes>, sequence: u32) -> Self {
        Self::new(vec![
            Bytes::from_static(topic.tag()),
            payload.into(),
            Bytes::copy_from_slice(&sequence.to_le_bytes()),
        ])
    }

    /// All parts in order.
    #[must_use]
    pub fn parts(&self) -> &[Bytes] {
        &self.parts
    }

    /// Part at `index`, if present.
    #[must_use]
    pub fn part(&self, index: usize) -> Option<&Bytes> {
        self.parts.get(index)
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when the frame has no parts at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Consume the frame.
    #[must_use]
    pub fn into_parts(self) -> Vec<Bytes> {
        self.parts
    }
}

impl From<Vec<Bytes>> for RawFrame {
    fn from(parts: Vec<Bytes>) -> Self {
        Self::new(parts)
    }
}

/// A decoded notification: topic plus opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEnvelope {
    /// Which feed the notification belongs to.
    pub topic: Topic,
    /// Unmodified payload bytes (part 1).
    pub payload: Bytes,
    /// Publisher sequence counter, when it was sent as 4 bytes.
    pub sequence: Option<u32>,
}
