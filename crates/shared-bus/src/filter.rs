//! # Topic Filter
//!
//! Prefix filter over the topic part of a frame, matching the semantics of a
//! ZMQ SUB socket subscription.

use shared_types::{RawFrame, Topic};

/// Set of topics a subscriber registered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicFilter {
    /// Registered topics. Never empty after construction via `all()`.
    pub topics: Vec<Topic>,
}

impl Default for TopicFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl TopicFilter {
    /// Register every published topic.
    #[must_use]
    pub fn all() -> Self {
        Self {
            topics: Topic::ALL.to_vec(),
        }
    }

    /// Register specific topics.
    #[must_use]
    pub fn topics(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// Tags to register on the transport, one per topic.
    pub fn prefixes(&self) -> impl Iterator<Item = &'static [u8; 3]> + '_ {
        self.topics.iter().map(|t| t.tag())
    }

    /// Check whether a frame passes the filter.
    ///
    /// A frame passes when part 0 starts with a registered tag. Frames with
    /// no parts pass so the decoder gets to reject them.
    #[must_use]
    pub fn matches(&self, frame: &RawFrame) -> bool {
        let Some(head) = frame.part(0) else {
            return true;
        };
        self.prefixes().any(|tag| head.starts_with(tag))
    }
}
