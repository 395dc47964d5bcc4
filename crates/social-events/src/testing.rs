//! In-memory doubles for the broker client and codec.

use crate::broker::{BrokerAck, BrokerClient, DeliveryFuture};
use crate::codec::EventCodec;
use crate::error::EventError;
use crate::event::SocialEvent;
use crate::health::HealthStatus;

use async_trait::async_trait;
use futures::FutureExt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// How [`MockBroker`] resolves every submission.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Acknowledge on `partition` with increasing offsets starting at 0.
    Ack { partition: i32 },
    /// Delivery timed out after client retries.
    Timeout,
    /// Fewer in-sync replicas than `min.insync.replicas`.
    NotEnoughReplicas,
    /// Fail with an arbitrary broker message.
    Fail(String),
}

/// A record handed to the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

/// Broker client that records submissions and resolves them from a script.
pub struct MockBroker {
    behavior: Mutex<MockBehavior>,
    submissions: Mutex<Vec<Submission>>,
    health_checks: Mutex<Vec<String>>,
    next_offset: AtomicI64,
}

impl MockBroker {
    #[must_use]
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            submissions: Mutex::new(Vec::new()),
            health_checks: Mutex::new(Vec::new()),
            next_offset: AtomicI64::new(0),
        }
    }

    /// Broker that acknowledges everything on partition 0.
    #[must_use]
    pub fn acking() -> Self {
        Self::new(MockBehavior::Ack { partition: 0 })
    }

    /// Change how later submissions resolve.
    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    /// Everything submitted so far, in submission order.
    #[must_use]
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    /// Topics passed to `health_check`.
    #[must_use]
    pub fn health_checked_topics(&self) -> Vec<String> {
        self.health_checks.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrokerClient for MockBroker {
    fn submit(&self, topic: &str, key: &str, payload: &[u8]) -> DeliveryFuture {
        self.submissions.lock().unwrap().push(Submission {
            topic: topic.to_string(),
            key: key.to_string(),
            payload: payload.to_vec(),
        });

        let topic = topic.to_string();
        let result = match self.behavior.lock().unwrap().clone() {
            MockBehavior::Ack { partition } => Ok(BrokerAck {
                topic,
                partition,
                offset: self.next_offset.fetch_add(1, Ordering::SeqCst),
            }),
            MockBehavior::Timeout => Err(EventError::PublishFailed {
                topic,
                cause: "Message production error: MessageTimedOut (Local: Message timed out)"
                    .to_string(),
            }),
            MockBehavior::NotEnoughReplicas => Err(EventError::PublishFailed {
                topic,
                cause: "Message production error: NotEnoughReplicas (Broker: Not enough in-sync replicas)"
                    .to_string(),
            }),
            MockBehavior::Fail(cause) => Err(EventError::PublishFailed { topic, cause }),
        };

        async move {
            yield_once().await;
            result
        }
        .boxed()
    }

    async fn health_check(&self, topic: &str) -> Result<HealthStatus, EventError> {
        self.health_checks.lock().unwrap().push(topic.to_string());
        Ok(HealthStatus {
            connected: true,
            brokers: 1,
            topic_present: true,
        })
    }
}

/// Resolve on a later poll, like a real network acknowledgment.
async fn yield_once() {
    let mut yielded = false;
    futures::future::poll_fn(|cx| {
        if yielded {
            std::task::Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            std::task::Poll::Pending
        }
    })
    .await;
}

/// Codec whose encoder always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCodec;

impl EventCodec for FailingCodec {
    fn encode(&self, event: &SocialEvent) -> Result<Vec<u8>, EventError> {
        Err(EventError::SerializationFailed {
            event_type: event.event_type().to_string(),
            cause: "unsupported value in eventData".to_string(),
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<SocialEvent, EventError> {
        crate::codec::JsonCodec.decode(bytes)
    }
}

/// Codec that encodes normally but cannot read its own output back.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndecodableCodec;

impl EventCodec for UndecodableCodec {
    fn encode(&self, event: &SocialEvent) -> Result<Vec<u8>, EventError> {
        crate::codec::JsonCodec.encode(event)
    }

    fn decode(&self, _bytes: &[u8]) -> Result<SocialEvent, EventError> {
        Err(EventError::DeserializationFailed {
            cause: "codec mismatch".to_string(),
        })
    }
}
