//! Outbound Ports (Driven Ports)
//!
//! The node's control plane as seen by the harness. The notification feed
//! itself is the other driven port, `shared_bus::FrameSource`.

use async_trait::async_trait;
use shared_types::CanonicalHash;
use std::sync::Arc;

use crate::error::CommandError;

/// Command interface of a node (Driven Port)
///
/// Synchronous request/response calls whose results are the authoritative
/// hashes the feed is checked against.
#[async_trait]
pub trait NodeCommands: Send + Sync {
    /// Generate `count` blocks and return their hashes in generation order.
    async fn generate(&self, count: usize) -> Result<Vec<CanonicalHash>, CommandError>;

    /// Send `amount` coins to `address` and return the transaction hash.
    async fn send_to_address(
        &self,
        address: &str,
        amount: f64,
    ) -> Result<CanonicalHash, CommandError>;

    /// Get a fresh receiving address from the node's wallet.
    async fn get_new_address(&self) -> Result<String, CommandError>;
}

#[async_trait]
impl<T: NodeCommands + ?Sized> NodeCommands for Arc<T> {
    async fn generate(&self, count: usize) -> Result<Vec<CanonicalHash>, CommandError> {
        (**self).generate(count).await
    }

    async fn send_to_address(
        &self,
        address: &str,
        amount: f64,
    ) -> Result<CanonicalHash, CommandError> {
        (**self).send_to_address(address, amount).await
    }

    async fn get_new_address(&self) -> Result<String, CommandError> {
        (**self).get_new_address().await
    }
}
