//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_events::{
    DeliveryFailure, EventCategory, HealthStatus, PlayerId, SocialEvent, SocialEventType,
};
use validator::Validate;

use crate::error::SocialApiError;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// `POST /api/v1/social-events/friend-request`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestRequest {
    #[validate(required(message = "Requester ID is required"))]
    pub requester_id: Option<PlayerId>,
    #[validate(required(message = "Target ID is required"))]
    pub target_id: Option<PlayerId>,
}

impl FriendRequestRequest {
    /// `(requester, target)`
    pub fn participants(&self) -> Result<(PlayerId, PlayerId), SocialApiError> {
        Ok((
            required("requesterId", self.requester_id)?,
            required("targetId", self.target_id)?,
        ))
    }
}

/// `POST /api/v1/social-events/friend-acceptance`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendAcceptanceRequest {
    #[validate(required(message = "Acceptor ID is required"))]
    pub acceptor_id: Option<PlayerId>,
    #[validate(required(message = "Requester ID is required"))]
    pub requester_id: Option<PlayerId>,
}

impl FriendAcceptanceRequest {
    /// `(acceptor, requester)`
    pub fn participants(&self) -> Result<(PlayerId, PlayerId), SocialApiError> {
        Ok((
            required("acceptorId", self.acceptor_id)?,
            required("requesterId", self.requester_id)?,
        ))
    }
}

/// `POST /api/v1/social-events/new-follower`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFollowerRequest {
    #[validate(required(message = "Follower ID is required"))]
    pub follower_id: Option<PlayerId>,
    #[validate(required(message = "Target ID is required"))]
    pub target_id: Option<PlayerId>,
}

impl NewFollowerRequest {
    /// `(follower, followed)`
    pub fn participants(&self) -> Result<(PlayerId, PlayerId), SocialApiError> {
        Ok((
            required("followerId", self.follower_id)?,
            required("targetId", self.target_id)?,
        ))
    }
}

fn required(field: &str, value: Option<PlayerId>) -> Result<PlayerId, SocialApiError> {
    value.ok_or_else(|| SocialApiError::Validation(format!("{field} is required")))
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Body returned for every publish attempt.
///
/// On success `eventId` is set and `errorMessage` is absent; on failure
/// `eventId` is null, `timestamp` is the failure time and `errorMessage` says
/// what went wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialEventResponse {
    pub event_id: Option<String>,
    pub category: EventCategory,
    pub event_type: SocialEventType,
    pub timestamp: DateTime<Utc>,
    pub player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SocialEventResponse {
    /// Success body built from the event as it was sent.
    #[must_use]
    pub fn delivered(sent: &SocialEvent) -> Self {
        Self {
            event_id: Some(sent.event_id().to_string()),
            category: sent.category(),
            event_type: sent.event_type(),
            timestamp: sent.timestamp(),
            player_id: sent.player_id(),
            error_message: None,
        }
    }

    #[must_use]
    pub fn failed(failure: &DeliveryFailure) -> Self {
        Self {
            event_id: None,
            category: EventCategory::Social,
            event_type: failure.event_type,
            timestamp: failure.failed_at,
            player_id: failure.player_id,
            error_message: Some(failure.message.clone()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }
}

/// `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded".
    pub status: String,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka: Option<HealthStatus>,
}
