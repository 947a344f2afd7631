//! # Frame Subscriber
//!
//! Defines the subscription side of the feed.

use crate::filter::TopicFilter;
use async_trait::async_trait;
use shared_types::RawFrame;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The feed was torn down.
    #[error("Feed closed")]
    Closed,

    /// The subscriber fell behind and frames were discarded.
    #[error("Subscriber lagged: {skipped} frames lost")]
    Lagged { skipped: u64 },

    /// The underlying transport failed.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// A source of raw frames in delivery order.
///
/// Each call returns exactly one frame. Implementations block (await) until
/// a frame arrives or the transport is closed. There is a single reader per
/// source, hence `&mut self`.
#[async_trait]
pub trait FrameSource: Send {
    /// Wait for the next frame that passes the source's topic filter.
    async fn next_frame(&mut self) -> Result<RawFrame, SubscriptionError>;
}

/// A subscription to an `InMemoryFeed`.
///
/// Dropping the subscription releases its receiver, which removes it from
/// the feed's subscriber count.
pub struct FeedSubscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<RawFrame>,

    /// Filter for this subscription.
    filter: TopicFilter,
}

impl FeedSubscription {
    pub(crate) fn new(receiver: broadcast::Receiver<RawFrame>, filter: TopicFilter) -> Self {
        Self { receiver, filter }
    }

    /// Try to receive the next matching frame without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(frame))` - A frame was available and matched
    /// - `Ok(None)` - No frame available
    /// - `Err(_)` - The feed closed or this subscriber lagged
    pub fn try_next_frame(&mut self) -> Result<Option<RawFrame>, SubscriptionError> {
        loop {
            let frame = match self.receiver.try_recv() {
                Ok(f) => f,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    return Err(SubscriptionError::Lagged { skipped })
                }
            };

            if self.filter.matches(&frame) {
                return Ok(Some(frame));
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &TopicFilter {
        &self.filter
    }
}

#[async_trait]
impl FrameSource for FeedSubscription {
    async fn next_frame(&mut self) -> Result<RawFrame, SubscriptionError> {
        loop {
            let frame = match self.receiver.recv().await {
                Ok(f) => f,
                Err(broadcast::error::RecvError::Closed) => return Err(SubscriptionError::Closed),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged, frames dropped");
                    return Err(SubscriptionError::Lagged { skipped });
                }
            };

            if self.filter.matches(&frame) {
                return Ok(frame);
            }
            debug!(parts = frame.len(), "Frame filtered out");
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        debug!(topics = ?self.filter.topics, "Subscription dropped");
    }
}
