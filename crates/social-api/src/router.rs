//! Router configuration for the social events API.

use axum::{
    routing::{get, post},
    Router,
};
use social_events::EventProducer;
use std::sync::Arc;

use crate::handlers;

/// Shared state for all handlers.
///
/// The producer wraps the single broker client created at startup.
#[derive(Clone)]
pub struct SocialState {
    pub producer: Arc<EventProducer>,
}

impl SocialState {
    pub fn new(producer: EventProducer) -> Self {
        Self {
            producer: Arc::new(producer),
        }
    }
}

/// Routes for the three social actions, meant to be nested under
/// `/api/v1/social-events`.
pub fn social_events_router() -> Router<SocialState> {
    Router::new()
        .route("/friend-request", post(handlers::friend_request))
        .route("/friend-acceptance", post(handlers::friend_acceptance))
        .route("/new-follower", post(handlers::new_follower))
}

/// Health route.
pub fn health_router() -> Router<SocialState> {
    Router::new().route("/health", get(handlers::health))
}

/// The complete application router.
pub fn social_router(state: SocialState) -> Router {
    Router::new()
        .nest("/api/v1/social-events", social_events_router())
        .merge(health_router())
        .with_state(state)
}
