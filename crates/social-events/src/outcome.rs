//! Result of a publish attempt.

use crate::broker::BrokerAck;
use crate::error::EventError;
use crate::event::{EventCategory, PlayerId, SocialEvent, SocialEventType};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Final state of one publish. Exactly one variant per attempt.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered(DeliveryReceipt),
    Failed(DeliveryFailure),
}

impl DeliveryOutcome {
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    #[must_use]
    pub fn event_type(&self) -> SocialEventType {
        match self {
            Self::Delivered(receipt) => receipt.event_type,
            Self::Failed(failure) => failure.event_type,
        }
    }

    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        match self {
            Self::Delivered(receipt) => receipt.player_id,
            Self::Failed(failure) => failure.player_id,
        }
    }
}

/// Broker acknowledgment joined with the identity of the event it stored.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub event_id: Uuid,
    pub category: EventCategory,
    pub event_type: SocialEventType,
    pub timestamp: DateTime<Utc>,
    pub player_id: PlayerId,
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    /// The bytes handed to the broker.
    pub payload: Vec<u8>,
}

impl DeliveryReceipt {
    pub(crate) fn new(event: &SocialEvent, ack: BrokerAck, payload: Vec<u8>) -> Self {
        Self {
            event_id: event.event_id(),
            category: event.category(),
            event_type: event.event_type(),
            timestamp: event.timestamp(),
            player_id: event.player_id(),
            topic: ack.topic,
            partition: ack.partition,
            offset: ack.offset,
            payload,
        }
    }
}

/// A publish that did not reach the broker log.
#[derive(Debug)]
pub struct DeliveryFailure {
    pub event_id: Uuid,
    pub event_type: SocialEventType,
    pub player_id: PlayerId,
    /// Caller-safe description of the failure.
    pub message: String,
    pub failed_at: DateTime<Utc>,
    /// Full cause, kept for logging.
    pub cause: EventError,
}

impl DeliveryFailure {
    pub(crate) fn new(
        event_id: Uuid,
        event_type: SocialEventType,
        player_id: PlayerId,
        cause: EventError,
    ) -> Self {
        Self {
            event_id,
            event_type,
            player_id,
            message: cause.client_message(),
            failed_at: Utc::now(),
            cause,
        }
    }
}
