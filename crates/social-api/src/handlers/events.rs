//! Social event handlers.
//!
//! - `POST /api/v1/social-events/friend-request`
//! - `POST /api/v1/social-events/friend-acceptance`
//! - `POST /api/v1/social-events/new-follower`
//!
//! Each handler builds and submits one event, then waits for the broker.
//! `202 Accepted` means the event is in the topic; `500` means it is not.
//! A client that disconnects early does not cancel the write.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use social_events::{DeliveryOutcome, PendingDelivery};
use tracing::{debug, error, instrument};

use crate::error::{ApiResult, SocialApiError};
use crate::extractors::ValidatedJson;
use crate::models::{
    FriendAcceptanceRequest, FriendRequestRequest, NewFollowerRequest, SocialEventResponse,
};
use crate::router::SocialState;

/// Publish a friend request event attributed to the requester.
#[instrument(skip_all)]
pub async fn friend_request(
    State(state): State<SocialState>,
    ValidatedJson(request): ValidatedJson<FriendRequestRequest>,
) -> ApiResult<Response> {
    let (requester_id, target_id) = request.participants()?;
    debug!(
        requester_id,
        target_id, "Processing friend request event"
    );

    let pending = state.producer.send_friend_request(requester_id, target_id);
    respond(&state, pending).await
}

/// Publish a friend acceptance event attributed to the acceptor.
#[instrument(skip_all)]
pub async fn friend_acceptance(
    State(state): State<SocialState>,
    ValidatedJson(request): ValidatedJson<FriendAcceptanceRequest>,
) -> ApiResult<Response> {
    let (acceptor_id, requester_id) = request.participants()?;
    debug!(
        acceptor_id,
        requester_id, "Processing friend acceptance event"
    );

    let pending = state
        .producer
        .send_friend_acceptance(acceptor_id, requester_id);
    respond(&state, pending).await
}

/// Publish a new follower event attributed to the follower.
#[instrument(skip_all)]
pub async fn new_follower(
    State(state): State<SocialState>,
    ValidatedJson(request): ValidatedJson<NewFollowerRequest>,
) -> ApiResult<Response> {
    let (follower_id, followed_id) = request.participants()?;
    debug!(follower_id, followed_id, "Processing new follower event");

    let pending = state.producer.send_new_follower(follower_id, followed_id);
    respond(&state, pending).await
}

/// Wait for the delivery and turn it into a response.
///
/// The success body is read back from the bytes that were actually sent, so
/// it can never disagree with what consumers see.
async fn respond(state: &SocialState, pending: PendingDelivery) -> ApiResult<Response> {
    match pending.outcome().await {
        DeliveryOutcome::Delivered(receipt) => {
            let sent = state
                .producer
                .codec()
                .decode(&receipt.payload)
                .map_err(|e| SocialApiError::ResponseReconstruction(e.to_string()))?;

            debug!(
                event_id = %sent.event_id(),
                event_type = %sent.event_type(),
                player_id = sent.player_id(),
                "Social event accepted"
            );

            Ok((
                StatusCode::ACCEPTED,
                Json(SocialEventResponse::delivered(&sent)),
            )
                .into_response())
        }
        DeliveryOutcome::Failed(failure) => {
            error!(
                event_type = %failure.event_type,
                player_id = failure.player_id,
                error = %failure.cause,
                "Failed to process social event"
            );

            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SocialEventResponse::failed(&failure)),
            )
                .into_response())
        }
    }
}
