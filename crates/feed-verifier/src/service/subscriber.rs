//! Topic Subscriber
//!
//! Single-reader receive loop over a `FrameSource`. Adds the receive bound
//! the raw transport lacks and hands decoded envelopes onward.

use std::sync::Arc;
use std::time::Duration;

use shared_bus::FrameSource;
use shared_types::{NotificationEnvelope, RawFrame};
use tracing::{debug, warn};

use crate::domain::decode_frame;
use crate::error::VerifierError;
use crate::metrics::VerificationMetrics;

/// Blocking (awaiting) receiver for one subscription.
pub struct TopicSubscriber<S: FrameSource> {
    source: S,
    timeout: Option<Duration>,
    metrics: Arc<VerificationMetrics>,
}

impl<S: FrameSource> TopicSubscriber<S> {
    /// Wrap a frame source. `timeout` of `None` waits forever.
    pub fn new(source: S, timeout: Option<Duration>) -> Self {
        Self {
            source,
            timeout,
            metrics: Arc::new(VerificationMetrics::new()),
        }
    }

    /// Share a metrics collector with the harness.
    pub fn with_metrics(mut self, metrics: Arc<VerificationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<VerificationMetrics> {
        &self.metrics
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Wait for the next raw frame in delivery order.
    pub async fn receive_next(&mut self) -> Result<RawFrame, VerifierError> {
        let frame = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.source.next_frame())
                .await
                .map_err(|_| {
                    warn!(?timeout, "Timed out waiting for notification");
                    VerifierError::NotificationTimeout { timeout }
                })??,
            None => self.source.next_frame().await?,
        };

        self.metrics.record_frame();
        Ok(frame)
    }

    /// Wait for the next frame and decode it.
    pub async fn receive_envelope(&mut self) -> Result<NotificationEnvelope, VerifierError> {
        let frame = self.receive_next().await?;
        let envelope = decode_frame(&frame)?;
        self.metrics.record_decoded();

        debug!(
            topic = %envelope.topic,
            sequence = ?envelope.sequence,
            payload_len = envelope.payload.len(),
            "Notification received"
        );
        Ok(envelope)
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}
