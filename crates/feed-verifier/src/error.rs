//! Error types for the feed verifier
//!
//! Every variant is fatal: the harness stops on the first error and reports
//! the exact values involved.

use std::time::Duration;

use shared_bus::SubscriptionError;
use shared_types::{HashParseError, Topic};
use thiserror::Error;

/// Errors raised while consuming and verifying the notification feed
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("Malformed envelope: {reason}")]
    MalformedEnvelope { reason: String },

    #[error("Truncated payload: need {required} bytes, got {actual}")]
    TruncatedPayload { required: usize, actual: usize },

    #[error("Connection closed while waiting for a notification")]
    ConnectionClosed,

    #[error("No notification received within {timeout:?}")]
    NotificationTimeout { timeout: Duration },

    #[error("Hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("Unexpected topic: waiting for {expected}, received {actual}")]
    UnexpectedTopic { expected: Topic, actual: Topic },

    #[error("Node returned {returned} hashes for {requested} requested")]
    ExpectedCountMismatch { requested: usize, returned: usize },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Command interface error: {0}")]
    Command(#[from] CommandError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VerifierError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEnvelope {
            reason: reason.into(),
        }
    }
}

impl From<SubscriptionError> for VerifierError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::Closed => Self::ConnectionClosed,
            SubscriptionError::Lagged { skipped } => {
                Self::Transport(format!("subscriber lagged, {skipped} frames lost"))
            }
            SubscriptionError::Transport(msg) => Self::Transport(msg),
        }
    }
}

/// Errors from the node's command interface
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Node returned a malformed hash: {0}")]
    InvalidHash(#[from] HashParseError),
}
