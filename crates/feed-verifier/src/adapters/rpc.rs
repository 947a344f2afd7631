//! JSON-RPC command client for a node.
//!
//! Speaks JSON-RPC 1.0 over HTTP POST with optional basic auth, the dialect
//! node wallets expose on their RPC port.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::CanonicalHash;
use tracing::{debug, trace};

use crate::error::CommandError;
use crate::ports::NodeCommands;

/// Bound on a whole RPC round trip. Generating a block batch on regtest can
/// take a few seconds.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

impl<'a> JsonRpcRequest<'a> {
    fn new(method: &'a str, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: "1.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<R> {
    result: Option<R>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl<R> JsonRpcResponse<R> {
    fn into_result(self) -> Result<R, CommandError> {
        if let Some(error) = self.error {
            return Err(CommandError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .ok_or_else(|| CommandError::Parse("Missing result in response".to_string()))
    }
}

/// Basic-auth credentials
#[derive(Debug, Clone)]
pub struct RpcCredentials {
    pub user: String,
    pub password: Option<String>,
}

/// Node command client over JSON-RPC.
pub struct JsonRpcNodeClient {
    client: Client,
    url: String,
    credentials: Option<RpcCredentials>,
    request_id: AtomicU64,
}

impl JsonRpcNodeClient {
    /// Create a client for the node at `url`.
    pub fn new(
        url: impl Into<String>,
        credentials: Option<RpcCredentials>,
    ) -> Result<Self, CommandError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| CommandError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            credentials,
            request_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Call a JSON-RPC method.
    ///
    /// Nodes answer RPC-level failures with a non-2xx status and a JSON body,
    /// so the body is parsed regardless of status.
    async fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, CommandError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());
        trace!(method, id = request.id, "RPC request");

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(creds) = &self.credentials {
            builder = builder.basic_auth(&creds.user, creds.password.as_ref());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                CommandError::Connection(format!("Cannot connect to {}", self.url))
            } else {
                CommandError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CommandError::Http(e.to_string()))?;

        let rpc_response: JsonRpcResponse<R> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                CommandError::Parse(e.to_string())
            } else {
                CommandError::Http(format!("{status}: {}", body.trim()))
            }
        })?;

        rpc_response.into_result()
    }
}

fn parse_hash(raw: &str) -> Result<CanonicalHash, CommandError> {
    Ok(raw.parse::<CanonicalHash>()?)
}

#[async_trait]
impl NodeCommands for JsonRpcNodeClient {
    /// Mines to a fresh wallet address with `generatetoaddress`.
    async fn generate(&self, count: usize) -> Result<Vec<CanonicalHash>, CommandError> {
        let address = self.get_new_address().await?;
        let hashes: Vec<String> = self
            .call("generatetoaddress", json!([count, address]))
            .await?;
        debug!(url = %self.url, requested = count, returned = hashes.len(), "Blocks generated");

        hashes.iter().map(|h| parse_hash(h)).collect()
    }

    async fn send_to_address(
        &self,
        address: &str,
        amount: f64,
    ) -> Result<CanonicalHash, CommandError> {
        let txid: String = self.call("sendtoaddress", json!([address, amount])).await?;
        debug!(url = %self.url, %txid, "Transaction sent");
        parse_hash(&txid)
    }

    async fn get_new_address(&self) -> Result<String, CommandError> {
        self.call("getnewaddress", json!([])).await
    }
}
