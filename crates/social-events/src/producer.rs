//! Social event publisher.

use crate::broker::{BrokerClient, DeliveryFuture};
use crate::codec::{EventCodec, JsonCodec};
use crate::error::EventError;
use crate::event::{PlayerId, SocialEvent, SocialEventType};
use crate::factory;
use crate::health::HealthStatus;
use crate::outcome::{DeliveryFailure, DeliveryOutcome, DeliveryReceipt};

use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Publishes social events to a single topic.
///
/// Cheap to share behind an `Arc`; the broker client inside is the one
/// process-wide connection.
pub struct EventProducer {
    broker: Arc<dyn BrokerClient>,
    codec: Arc<dyn EventCodec>,
    topic: String,
}

impl EventProducer {
    /// Create a producer that encodes with [`JsonCodec`].
    pub fn new(broker: Arc<dyn BrokerClient>, topic: impl Into<String>) -> Self {
        Self::with_codec(broker, Arc::new(JsonCodec), topic)
    }

    /// Create a producer with an explicit codec.
    pub fn with_codec(
        broker: Arc<dyn BrokerClient>,
        codec: Arc<dyn EventCodec>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            broker,
            codec,
            topic: topic.into(),
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The codec used for outgoing payloads.
    #[must_use]
    pub fn codec(&self) -> &dyn EventCodec {
        self.codec.as_ref()
    }

    /// Publish a friend request from `requester_id` to `target_id`.
    pub fn send_friend_request(
        &self,
        requester_id: PlayerId,
        target_id: PlayerId,
    ) -> PendingDelivery {
        self.publish(factory::friend_request(requester_id, target_id))
    }

    /// Publish `acceptor_id` accepting the request of `requester_id`.
    pub fn send_friend_acceptance(
        &self,
        acceptor_id: PlayerId,
        requester_id: PlayerId,
    ) -> PendingDelivery {
        self.publish(factory::friend_accepted(acceptor_id, requester_id))
    }

    /// Publish `follower_id` following `followed_id`.
    pub fn send_new_follower(
        &self,
        follower_id: PlayerId,
        followed_id: PlayerId,
    ) -> PendingDelivery {
        self.publish(factory::new_follower(follower_id, followed_id))
    }

    /// Encode and submit an event without waiting for the broker.
    ///
    /// The record is keyed by the subject player. If encoding fails nothing is
    /// submitted and the returned handle resolves to a failure.
    #[instrument(skip(self, event), fields(
        event_id = %event.event_id(),
        event_type = %event.event_type(),
        player_id = event.player_id()
    ))]
    pub fn publish(&self, event: SocialEvent) -> PendingDelivery {
        let payload = match self.codec.encode(&event) {
            Ok(payload) => payload,
            Err(cause) => {
                error!(error = %cause, "Failed to encode social event, nothing submitted");
                return PendingDelivery {
                    event,
                    state: PendingState::Rejected(cause),
                };
            }
        };

        let key = event.partition_key();

        debug!(
            topic = %self.topic,
            key = %key,
            payload_size = payload.len(),
            "Submitting social event"
        );

        let delivery = self.broker.submit(&self.topic, &key, &payload);

        PendingDelivery {
            event,
            state: PendingState::InFlight { payload, delivery },
        }
    }

    /// Check the broker connection and the configured topic.
    pub async fn health_check(&self) -> Result<HealthStatus, EventError> {
        self.broker.health_check(&self.topic).await
    }
}

/// Handle to a submitted event.
///
/// Dropping it does not retract the record; it may still be written.
pub struct PendingDelivery {
    event: SocialEvent,
    state: PendingState,
}

enum PendingState {
    InFlight {
        payload: Vec<u8>,
        delivery: DeliveryFuture,
    },
    Rejected(EventError),
}

impl PendingDelivery {
    #[must_use]
    pub fn event_id(&self) -> Uuid {
        self.event.event_id()
    }

    #[must_use]
    pub fn event_type(&self) -> SocialEventType {
        self.event.event_type()
    }

    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        self.event.player_id()
    }

    /// Whether the record was handed to the broker client.
    #[must_use]
    pub fn was_submitted(&self) -> bool {
        matches!(self.state, PendingState::InFlight { .. })
    }

    /// Wait for the broker's verdict.
    ///
    /// No timeout of its own: it resolves when the client's delivery timeout
    /// does.
    #[instrument(skip(self), fields(
        event_id = %self.event.event_id(),
        event_type = %self.event.event_type(),
        player_id = self.event.player_id()
    ))]
    pub async fn outcome(self) -> DeliveryOutcome {
        let Self { event, state } = self;

        match state {
            PendingState::InFlight { payload, delivery } => match delivery.await {
                Ok(ack) => {
                    info!(
                        topic = %ack.topic,
                        partition = ack.partition,
                        offset = ack.offset,
                        "Social event delivered"
                    );
                    DeliveryOutcome::Delivered(DeliveryReceipt::new(&event, ack, payload))
                }
                Err(cause) => {
                    error!(
                        error = %cause,
                        transient = cause.is_transient(),
                        "Social event delivery failed"
                    );
                    DeliveryOutcome::Failed(failure(&event, cause))
                }
            },
            PendingState::Rejected(cause) => DeliveryOutcome::Failed(failure(&event, cause)),
        }
    }
}

fn failure(event: &SocialEvent, cause: EventError) -> DeliveryFailure {
    DeliveryFailure::new(event.event_id(), event.event_type(), event.player_id(), cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingCodec, MockBehavior, MockBroker};

    const TOPIC: &str = "social-events";

    fn producer(broker: &Arc<MockBroker>) -> EventProducer {
        EventProducer::new(broker.clone(), TOPIC)
    }

    #[tokio::test]
    async fn test_friend_request_is_keyed_by_requester() {
        let broker = Arc::new(MockBroker::acking());
        let producer = producer(&broker);

        let pending = producer.send_friend_request(123, 456);
        let event_id = pending.event_id();
        let outcome = pending.outcome().await;

        let DeliveryOutcome::Delivered(receipt) = outcome else {
            panic!("expected delivery");
        };
        assert_eq!(receipt.event_id, event_id);
        assert_eq!(receipt.event_type, SocialEventType::FriendRequest);
        assert_eq!(receipt.player_id, 123);
        assert_eq!(receipt.topic, TOPIC);

        let submissions = broker.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].topic, TOPIC);
        assert_eq!(submissions[0].key, "123");
        assert_eq!(submissions[0].payload, receipt.payload);
    }

    #[tokio::test]
    async fn test_submitted_payload_is_the_wire_envelope() {
        let broker = Arc::new(MockBroker::acking());
        let producer = producer(&broker);

        producer.send_friend_acceptance(456, 123).outcome().await;

        let sent: serde_json::Value =
            serde_json::from_slice(&broker.submissions()[0].payload).unwrap();
        assert_eq!(sent["category"], "SOCIAL");
        assert_eq!(sent["eventType"], "FRIEND_ACCEPTED");
        assert_eq!(sent["playerId"], 456);
        assert_eq!(sent["eventData"]["requesterId"], 123);
    }

    #[tokio::test]
    async fn test_broker_timeout_becomes_failure() {
        let broker = Arc::new(MockBroker::new(MockBehavior::Timeout));
        let producer = producer(&broker);

        let outcome = producer.send_new_follower(10, 20).outcome().await;

        let DeliveryOutcome::Failed(failure) = outcome else {
            panic!("expected failure");
        };
        assert_eq!(failure.event_type, SocialEventType::NewFollower);
        assert_eq!(failure.player_id, 10);
        assert!(failure.message.contains("timed out"));
        assert!(failure.cause.is_transient());
        assert_eq!(broker.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_not_enough_replicas_becomes_failure() {
        let broker = Arc::new(MockBroker::new(MockBehavior::NotEnoughReplicas));
        let producer = producer(&broker);

        let outcome = producer.send_friend_request(1, 2).outcome().await;

        assert!(!outcome.is_delivered());
        assert_eq!(outcome.event_type(), SocialEventType::FriendRequest);
        assert_eq!(outcome.player_id(), 1);
    }

    #[tokio::test]
    async fn test_encoding_failure_never_reaches_broker() {
        let broker = Arc::new(MockBroker::acking());
        let producer =
            EventProducer::with_codec(broker.clone(), Arc::new(FailingCodec), TOPIC);

        let pending = producer.send_friend_request(123, 456);
        assert!(!pending.was_submitted());

        let outcome = pending.outcome().await;

        let DeliveryOutcome::Failed(failure) = outcome else {
            panic!("expected failure");
        };
        assert!(matches!(
            failure.cause,
            EventError::SerializationFailed { .. }
        ));
        assert_eq!(failure.message, "Failed to serialize FRIEND_REQUEST event");
        assert!(broker.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_submission_happens_before_awaiting() {
        let broker = Arc::new(MockBroker::acking());
        let producer = producer(&broker);

        let pending = producer.send_new_follower(10, 20);

        assert!(pending.was_submitted());
        assert_eq!(broker.submissions().len(), 1);
        drop(pending);
        assert_eq!(broker.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_same_player_keeps_submission_order() {
        let broker = Arc::new(MockBroker::acking());
        let producer = producer(&broker);

        let first = producer.send_friend_request(7, 1);
        let second = producer.send_new_follower(7, 2);
        let third = producer.send_friend_acceptance(7, 3);
        let ids = [first.event_id(), second.event_id(), third.event_id()];

        let mut offsets = Vec::new();
        for pending in [first, second, third] {
            if let DeliveryOutcome::Delivered(receipt) = pending.outcome().await {
                offsets.push(receipt.offset);
            }
        }

        assert_eq!(offsets, vec![0, 1, 2]);
        let submissions = broker.submissions();
        assert!(submissions.iter().all(|s| s.key == "7"));
        let sent_ids: Vec<Uuid> = submissions
            .iter()
            .map(|s| JsonCodec.decode(&s.payload).unwrap().event_id())
            .collect();
        assert_eq!(sent_ids, ids);
    }

    #[tokio::test]
    async fn test_health_check_uses_configured_topic() {
        let broker = Arc::new(MockBroker::acking());
        let producer = producer(&broker);

        let status = producer.health_check().await.unwrap();

        assert!(status.is_healthy());
        assert_eq!(broker.health_checked_topics(), vec![TOPIC.to_string()]);
    }
}
