//! Broker client abstraction.

use crate::error::EventError;
use crate::health::HealthStatus;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Where the broker stored an acknowledged record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAck {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

/// Resolves once the broker acknowledges the write or definitively fails it.
pub type DeliveryFuture = BoxFuture<'static, Result<BrokerAck, EventError>>;

/// A client able to append keyed records to a topic.
///
/// One instance is shared by every request for the life of the process.
/// Retries and deduplication are the client's own business; callers see
/// a single final result per record.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Hand a record to the client and return a handle to its delivery.
    ///
    /// Must not block on the network. Errors that happen while enqueueing are
    /// reported through the returned future, never synchronously.
    fn submit(&self, topic: &str, key: &str, payload: &[u8]) -> DeliveryFuture;

    /// Report connectivity and whether `topic` is known to the cluster.
    async fn health_check(&self, topic: &str) -> Result<HealthStatus, EventError>;
}
