//! Canonical social event model.

use crate::error::EventError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Platform-wide player identifier.
pub type PlayerId = i64;

/// Event category. Other categories belong to other services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Social,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Social => write!(f, "SOCIAL"),
        }
    }
}

/// Kind of social action an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialEventType {
    FriendRequest,
    FriendAccepted,
    NewFollower,
}

impl SocialEventType {
    /// Wire name of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FriendRequest => "FRIEND_REQUEST",
            Self::FriendAccepted => "FRIEND_ACCEPTED",
            Self::NewFollower => "NEW_FOLLOWER",
        }
    }

    /// Key under which `eventData` carries the secondary participant.
    #[must_use]
    pub fn data_key(&self) -> &'static str {
        match self {
            Self::FriendRequest => "targetId",
            Self::FriendAccepted => "requesterId",
            Self::NewFollower => "followedId",
        }
    }
}

impl fmt::Display for SocialEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action-specific payload. The variant fixes both the event type and the
/// single key present in `eventData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventData {
    /// Subject sent a friend request to `target_id`.
    FriendRequest { target_id: PlayerId },
    /// Subject accepted the friend request sent by `requester_id`.
    FriendAccepted { requester_id: PlayerId },
    /// Subject started following `followed_id`.
    NewFollower { followed_id: PlayerId },
}

impl EventData {
    #[must_use]
    pub fn event_type(&self) -> SocialEventType {
        match self {
            Self::FriendRequest { .. } => SocialEventType::FriendRequest,
            Self::FriendAccepted { .. } => SocialEventType::FriendAccepted,
            Self::NewFollower { .. } => SocialEventType::NewFollower,
        }
    }

    /// The other participant of the action.
    #[must_use]
    pub fn counterpart(&self) -> PlayerId {
        match *self {
            Self::FriendRequest { target_id } => target_id,
            Self::FriendAccepted { requester_id } => requester_id,
            Self::NewFollower { followed_id } => followed_id,
        }
    }

    fn to_map(self) -> Map<String, Value> {
        let mut map = Map::with_capacity(1);
        map.insert(
            self.event_type().data_key().to_string(),
            Value::from(self.counterpart()),
        );
        map
    }

    fn from_map(
        event_type: SocialEventType,
        map: &Map<String, Value>,
    ) -> Result<Self, EventError> {
        let key = event_type.data_key();

        if map.len() != 1 {
            return Err(EventError::InvalidEnvelope {
                reason: format!(
                    "eventData for {event_type} must hold exactly '{key}', found {} keys",
                    map.len()
                ),
            });
        }

        let id = map
            .get(key)
            .and_then(Value::as_i64)
            .ok_or_else(|| EventError::InvalidEnvelope {
                reason: format!("eventData for {event_type} is missing integer '{key}'"),
            })?;

        Ok(match event_type {
            SocialEventType::FriendRequest => Self::FriendRequest { target_id: id },
            SocialEventType::FriendAccepted => Self::FriendAccepted { requester_id: id },
            SocialEventType::NewFollower => Self::NewFollower { followed_id: id },
        })
    }
}

/// A social event as published to the broker.
///
/// Immutable once built. Fields are only reachable through accessors so the
/// event type always agrees with the payload it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireEvent", into = "WireEvent")]
pub struct SocialEvent {
    category: EventCategory,
    event_id: Uuid,
    timestamp: DateTime<Utc>,
    player_id: PlayerId,
    data: EventData,
}

impl SocialEvent {
    /// Assemble an event from explicit identity and time.
    ///
    /// The factory functions are the normal entry point; this exists for
    /// replay and deterministic tests.
    #[must_use]
    pub fn new(
        event_id: Uuid,
        timestamp: DateTime<Utc>,
        player_id: PlayerId,
        data: EventData,
    ) -> Self {
        Self {
            category: EventCategory::Social,
            event_id,
            timestamp,
            player_id,
            data,
        }
    }

    #[must_use]
    pub fn category(&self) -> EventCategory {
        self.category
    }

    #[must_use]
    pub fn event_type(&self) -> SocialEventType {
        self.data.event_type()
    }

    #[must_use]
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The player the event is attributed to.
    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    #[must_use]
    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Partition key: the subject player in its canonical string form.
    #[must_use]
    pub fn partition_key(&self) -> String {
        self.player_id.to_string()
    }
}

/// JSON envelope layout:
/// `{category, eventType, eventId, timestamp, playerId, eventData}`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEvent {
    category: EventCategory,
    event_type: SocialEventType,
    event_id: Uuid,
    timestamp: DateTime<Utc>,
    player_id: PlayerId,
    event_data: Map<String, Value>,
}

impl From<SocialEvent> for WireEvent {
    fn from(event: SocialEvent) -> Self {
        Self {
            category: event.category,
            event_type: event.event_type(),
            event_id: event.event_id,
            timestamp: event.timestamp,
            player_id: event.player_id,
            event_data: event.data.to_map(),
        }
    }
}

impl TryFrom<WireEvent> for SocialEvent {
    type Error = EventError;

    fn try_from(wire: WireEvent) -> Result<Self, Self::Error> {
        let data = EventData::from_map(wire.event_type, &wire.event_data)?;
        Ok(Self {
            category: wire.category,
            event_id: wire.event_id,
            timestamp: wire.timestamp,
            player_id: wire.player_id,
            data,
        })
    }
}
