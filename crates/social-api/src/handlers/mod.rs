//! HTTP handlers.

pub mod events;
pub mod health;

pub use events::{friend_acceptance, friend_request, new_follower};
pub use health::health;
