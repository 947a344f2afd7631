//! Harness configuration
//!
//! Defaults match a local regtest node publishing on port 28332. Values can
//! come from the environment (`from_env`) and be overridden by CLI flags.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use shared_types::PayloadFormat;

use crate::error::VerifierError;

/// Default notification endpoint.
pub const DEFAULT_ZMQ_ENDPOINT: &str = "tcp://127.0.0.1:28332";

/// Default primary node RPC URL.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:18332";

/// Default bound on a single receive.
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of blocks in the batch check.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default transaction amount in coins.
pub const DEFAULT_SEND_AMOUNT: f64 = 1.0;

/// Default pause between subscribing and the first command.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

const ENDPOINT_SCHEMES: [&str; 3] = ["tcp://", "ipc://", "inproc://"];

/// Configuration for one harness run
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Notification feed endpoint
    pub zmq_endpoint: String,
    /// RPC URL of the node whose feed is subscribed
    pub rpc_url: String,
    /// RPC URL of a second node that drives batch blocks and the transaction
    pub peer_rpc_url: Option<String>,
    /// RPC basic-auth user
    pub rpc_user: Option<String>,
    /// RPC basic-auth password
    pub rpc_password: Option<String>,
    /// Bound on each receive; `None` waits forever
    pub receive_timeout: Option<Duration>,
    /// Blocks generated in the batch check
    pub batch_size: usize,
    /// Coins sent in the transaction check
    pub send_amount: f64,
    /// How the publisher encodes payloads
    pub payload_format: PayloadFormat,
    /// Pause after subscribing so the SUB socket joins before the first publish
    pub settle: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            zmq_endpoint: DEFAULT_ZMQ_ENDPOINT.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            peer_rpc_url: None,
            rpc_user: None,
            rpc_password: None,
            receive_timeout: Some(DEFAULT_RECV_TIMEOUT),
            batch_size: DEFAULT_BATCH_SIZE,
            send_amount: DEFAULT_SEND_AMOUNT,
            payload_format: PayloadFormat::Network,
            settle: DEFAULT_SETTLE,
        }
    }
}

impl HarnessConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FEED_ZMQ_ENDPOINT`: feed endpoint (default: tcp://127.0.0.1:28332)
    /// - `FEED_RPC_URL`: primary node RPC (default: http://127.0.0.1:18332)
    /// - `FEED_PEER_RPC_URL`: optional peer node RPC
    /// - `FEED_RPC_USER` / `FEED_RPC_PASSWORD`: basic auth
    /// - `FEED_RECV_TIMEOUT_SECS`: receive bound, 0 waits forever (default: 5)
    /// - `FEED_BATCH_SIZE`: blocks in the batch check (default: 10)
    /// - `FEED_SEND_AMOUNT`: coins sent in the transaction check (default: 1.0)
    /// - `FEED_PAYLOAD_FORMAT`: `network` or `hash` (default: network)
    /// - `FEED_SETTLE_MS`: pause after subscribing (default: 500)
    ///
    /// A variable that is set but does not parse is a `Config` error, the
    /// same as the equivalent CLI flag.
    pub fn from_env() -> Result<Self, VerifierError> {
        let defaults = Self::default();

        Ok(Self {
            zmq_endpoint: env::var("FEED_ZMQ_ENDPOINT").unwrap_or(defaults.zmq_endpoint),
            rpc_url: env::var("FEED_RPC_URL").unwrap_or(defaults.rpc_url),
            peer_rpc_url: env::var("FEED_PEER_RPC_URL").ok(),
            rpc_user: env::var("FEED_RPC_USER").ok(),
            rpc_password: env::var("FEED_RPC_PASSWORD").ok(),
            receive_timeout: parse_var::<u64>("FEED_RECV_TIMEOUT_SECS")?
                .map_or(defaults.receive_timeout, timeout_from_secs),
            batch_size: parse_var("FEED_BATCH_SIZE")?.unwrap_or(defaults.batch_size),
            send_amount: parse_var("FEED_SEND_AMOUNT")?.unwrap_or(defaults.send_amount),
            payload_format: parse_var("FEED_PAYLOAD_FORMAT")?.unwrap_or(defaults.payload_format),
            settle: parse_var("FEED_SETTLE_MS")?.map_or(defaults.settle, Duration::from_millis),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), VerifierError> {
        if !ENDPOINT_SCHEMES
            .iter()
            .any(|scheme| self.zmq_endpoint.starts_with(scheme))
        {
            return Err(VerifierError::Config(format!(
                "unsupported endpoint {:?}, expected one of {ENDPOINT_SCHEMES:?}",
                self.zmq_endpoint
            )));
        }

        if self.batch_size == 0 {
            return Err(VerifierError::Config(
                "batch_size cannot be 0".to_string(),
            ));
        }

        if !(self.send_amount.is_finite() && self.send_amount > 0.0) {
            return Err(VerifierError::Config(format!(
                "send_amount must be positive, got {}",
                self.send_amount
            )));
        }

        if self.rpc_password.is_some() && self.rpc_user.is_none() {
            return Err(VerifierError::Config(
                "rpc_password set without rpc_user".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the receive timeout
    pub fn with_receive_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.receive_timeout = timeout;
        self
    }

    /// Builder-style method to set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder-style method to set the payload format
    pub fn with_payload_format(mut self, format: PayloadFormat) -> Self {
        self.payload_format = format;
        self
    }
}

/// Read and parse one variable; unset is `None`.
fn parse_var<T>(key: &str) -> Result<Option<T>, VerifierError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| VerifierError::Config(format!("{key}={raw:?}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Seconds to timeout, where 0 disables the bound.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
