//! Health check types.

use serde::{Deserialize, Serialize};

/// Health status of the broker connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Whether the connection is established.
    pub connected: bool,
    /// Number of brokers discovered.
    pub brokers: usize,
    /// Whether the configured topic exists in the cluster metadata.
    pub topic_present: bool,
}

impl HealthStatus {
    /// Check if the connection can take publishes.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.connected && self.brokers > 0 && self.topic_present
    }
}
