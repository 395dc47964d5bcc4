//! Wire codec for social events.

use crate::error::EventError;
use crate::event::SocialEvent;

/// Converts events to and from their wire payload.
///
/// The publisher encodes with it and the HTTP boundary decodes the exact bytes
/// that were sent, so both sides must share one instance.
pub trait EventCodec: Send + Sync {
    /// Encode an event for transmission.
    fn encode(&self, event: &SocialEvent) -> Result<Vec<u8>, EventError>;

    /// Decode a payload produced by [`EventCodec::encode`].
    fn decode(&self, bytes: &[u8]) -> Result<SocialEvent, EventError>;
}

/// JSON envelope codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl EventCodec for JsonCodec {
    fn encode(&self, event: &SocialEvent) -> Result<Vec<u8>, EventError> {
        serde_json::to_vec(event).map_err(|e| EventError::SerializationFailed {
            event_type: event.event_type().to_string(),
            cause: e.to_string(),
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<SocialEvent, EventError> {
        serde_json::from_slice(bytes).map_err(|e| EventError::DeserializationFailed {
            cause: e.to_string(),
        })
    }
}
