//! ZeroMQ SUB adapter for the notification feed.
//!
//! A SUB socket reconnects silently when its publisher goes away, so the
//! socket monitor is watched alongside `recv` and a peer disconnect ends the
//! stream with `SubscriptionError::Closed`.

use std::time::Duration;

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use shared_bus::{FrameSource, SubscriptionError, TopicFilter};
use shared_types::RawFrame;
use tracing::{debug, info, warn};
use zeromq::{Socket, SocketEvent, SocketRecv, SubSocket, ZmqError, ZmqMessage};

use crate::error::VerifierError;
use crate::service::TopicSubscriber;

/// Frame source reading from a connected SUB socket.
pub struct ZmqFrameSource {
    socket: SubSocket,
    events: mpsc::Receiver<SocketEvent>,
    endpoint: String,
}

impl ZmqFrameSource {
    /// Connect to `endpoint` and subscribe to every topic in `filter`.
    ///
    /// Topic matching is prefix-based and done by the socket itself.
    pub async fn connect(endpoint: &str, filter: &TopicFilter) -> Result<Self, VerifierError> {
        let mut socket = SubSocket::new();
        let events = socket.monitor();
        socket
            .connect(endpoint)
            .await
            .map_err(|e| VerifierError::Transport(format!("connect {endpoint}: {e}")))?;

        for topic in &filter.topics {
            socket
                .subscribe(&topic.to_string())
                .await
                .map_err(|e| VerifierError::Transport(format!("subscribe {topic}: {e}")))?;
        }

        info!(endpoint, topics = ?filter.topics, "Subscribed to notification feed");
        Ok(Self {
            socket,
            events,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Multipart message → frame, parts in order.
pub fn frame_from_message(message: ZmqMessage) -> RawFrame {
    RawFrame::new(message.into_vec())
}

#[async_trait]
impl FrameSource for ZmqFrameSource {
    async fn next_frame(&mut self) -> Result<RawFrame, SubscriptionError> {
        loop {
            tokio::select! {
                // Queued frames drain before a disconnect is reported.
                biased;

                received = self.socket.recv() => {
                    return match received {
                        Ok(message) => {
                            let frame = frame_from_message(message);
                            debug!(parts = frame.len(), "ZMQ message received");
                            Ok(frame)
                        }
                        Err(ZmqError::NoMessage) => Err(SubscriptionError::Closed),
                        Err(e) => Err(SubscriptionError::Transport(e.to_string())),
                    };
                }
                event = self.events.next() => match event {
                    Some(SocketEvent::Disconnected(_)) | None => {
                        warn!(endpoint = %self.endpoint, "Publisher disconnected");
                        return Err(SubscriptionError::Closed);
                    }
                    Some(_) => continue,
                },
            }
        }
    }
}

/// Connect and wrap the socket in a bounded `TopicSubscriber`.
pub async fn subscribe(
    endpoint: &str,
    filter: &TopicFilter,
    timeout: Option<Duration>,
) -> Result<TopicSubscriber<ZmqFrameSource>, VerifierError> {
    let source = ZmqFrameSource::connect(endpoint, filter).await?;
    Ok(TopicSubscriber::new(source, timeout))
}
