//! HTTP boundary for social event publishing.
//!
//! Accepts the three social actions, publishes the matching event and holds
//! the request open until the broker has acknowledged or rejected it, so the
//! caller learns the final delivery status in one round trip.
//!
//! # Example
//!
//! ```rust,ignore
//! use social_api::{social_router, SocialState};
//!
//! let app = social_router(SocialState::new(producer));
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod router;

pub use error::{ApiResult, SocialApiError};
pub use models::{
    FriendAcceptanceRequest, FriendRequestRequest, HealthResponse, NewFollowerRequest,
    SocialEventResponse,
};
pub use router::{health_router, social_events_router, social_router, SocialState};
