//! librdkafka-backed broker client.

use crate::broker::{BrokerAck, BrokerClient, DeliveryFuture};
use crate::config::KafkaConfig;
use crate::error::EventError;
use crate::health::HealthStatus;

use async_trait::async_trait;
use futures::FutureExt;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use std::time::Duration;
use tracing::{info, warn};

const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka producer shared by all request handlers.
pub struct KafkaBroker {
    producer: FutureProducer,
    bootstrap_servers: String,
}

impl KafkaBroker {
    /// Create the producer. Connections are opened lazily by librdkafka.
    pub fn new(config: KafkaConfig) -> Result<Self, EventError> {
        let mut client_config = ClientConfig::new();
        for (key, value) in config.producer_properties() {
            client_config.set(key, value);
        }

        let producer: FutureProducer =
            client_config
                .create()
                .map_err(|e| EventError::ConnectionFailed {
                    broker: config.bootstrap_servers.clone(),
                    cause: e.to_string(),
                })?;

        info!(
            bootstrap_servers = %config.bootstrap_servers,
            client_id = %config.client_id,
            topic = %config.topic,
            retries = config.retries,
            "Kafka producer created (acks=all, idempotent)"
        );

        Ok(Self {
            producer,
            bootstrap_servers: config.bootstrap_servers,
        })
    }

    /// Wait for in-flight deliveries. Called once at shutdown.
    pub fn flush(&self, timeout: Duration) -> Result<(), EventError> {
        self.producer.flush(timeout)?;
        Ok(())
    }
}

#[async_trait]
impl BrokerClient for KafkaBroker {
    fn submit(&self, topic: &str, key: &str, payload: &[u8]) -> DeliveryFuture {
        let record = FutureRecord::to(topic).key(key).payload(payload);
        let topic = topic.to_string();

        match self.producer.send_result(record) {
            Ok(delivery) => async move {
                match delivery.await {
                    Ok(Ok((partition, offset))) => Ok(BrokerAck {
                        topic,
                        partition,
                        offset,
                    }),
                    Ok(Err((err, _message))) => Err(EventError::PublishFailed {
                        topic,
                        cause: err.to_string(),
                    }),
                    Err(_canceled) => Err(EventError::DeliveryCanceled { topic }),
                }
            }
            .boxed(),
            Err((err, _record)) => {
                warn!(topic = %topic, error = %err, "Kafka refused to enqueue record");
                let failure = EventError::PublishFailed {
                    topic,
                    cause: err.to_string(),
                };
                futures::future::ready(Err(failure)).boxed()
            }
        }
    }

    async fn health_check(&self, topic: &str) -> Result<HealthStatus, EventError> {
        let producer = self.producer.clone();
        let topic = topic.to_string();
        let broker = self.bootstrap_servers.clone();

        // Metadata requests block the calling thread.
        let metadata = tokio::task::spawn_blocking(move || {
            producer
                .client()
                .fetch_metadata(Some(&topic), METADATA_TIMEOUT)
                .map(|metadata| {
                    let topic_present = metadata
                        .topics()
                        .iter()
                        .any(|t| t.name() == topic && t.error().is_none());
                    (metadata.brokers().len(), topic_present)
                })
        })
        .await
        .map_err(|e| EventError::ConnectionFailed {
            broker: broker.clone(),
            cause: e.to_string(),
        })?;

        let (brokers, topic_present) = metadata.map_err(|e| EventError::ConnectionFailed {
            broker,
            cause: e.to_string(),
        })?;

        Ok(HealthStatus {
            connected: true,
            brokers,
            topic_present,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broker_creation_is_lazy() {
        let config = KafkaConfig::builder()
            .bootstrap_servers("localhost:9092")
            .client_id("test")
            .build()
            .unwrap();

        // librdkafka validates properties here but does not connect yet.
        assert!(KafkaBroker::new(config).is_ok());
    }
}
