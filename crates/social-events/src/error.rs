//! Error types for the social-events crate.

use thiserror::Error;

/// Longest message text handed back to callers.
const MAX_CLIENT_MESSAGE_LEN: usize = 256;

/// Errors that can occur while building, encoding or publishing events.
#[derive(Debug, Error)]
pub enum EventError {
    // Configuration errors (permanent, no retry)
    /// Required configuration variable is missing.
    #[error("Configuration missing: {var}")]
    ConfigMissing { var: String },

    /// Configuration value is invalid.
    #[error("Configuration invalid for {var}: {reason}")]
    ConfigInvalid { var: String, reason: String },

    // Connection errors (transient)
    /// Failed to connect to Kafka broker.
    #[error("Connection to broker {broker} failed: {cause}")]
    ConnectionFailed { broker: String, cause: String },

    // Publishing errors
    /// The broker rejected the record or it could not be delivered in time.
    #[error("Failed to publish to topic {topic}: {cause}")]
    PublishFailed { topic: String, cause: String },

    /// The delivery report was dropped before the broker answered.
    #[error("Delivery to topic {topic} was canceled before acknowledgment")]
    DeliveryCanceled { topic: String },

    /// Failed to serialize event.
    #[error("Failed to serialize event type {event_type}: {cause}")]
    SerializationFailed { event_type: String, cause: String },

    /// Failed to deserialize event.
    #[error("Failed to deserialize event: {cause}")]
    DeserializationFailed { cause: String },

    // Envelope errors
    /// The wire envelope is structurally valid JSON but breaks the event rules.
    #[error("Invalid event envelope: {reason}")]
    InvalidEnvelope { reason: String },

    // Internal Kafka errors
    /// Internal Kafka client error.
    #[cfg(feature = "kafka")]
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
}

impl EventError {
    /// Returns true if this error is transient and a later attempt could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EventError::ConnectionFailed { .. }
                | EventError::PublishFailed { .. }
                | EventError::DeliveryCanceled { .. }
        )
    }

    /// Returns true if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EventError::ConfigMissing { .. } | EventError::ConfigInvalid { .. }
        )
    }

    /// Message safe to return to a caller.
    ///
    /// Encoding failures only say which event type could not be encoded; the
    /// serializer detail stays in the logs. Everything else keeps its display
    /// text, cut to a bounded length.
    #[must_use]
    pub fn client_message(&self) -> String {
        let message = match self {
            EventError::SerializationFailed { event_type, .. } => {
                format!("Failed to serialize {event_type} event")
            }
            other => other.to_string(),
        };
        truncate(message, MAX_CLIENT_MESSAGE_LEN)
    }
}

fn truncate(mut message: String, max: usize) -> String {
    if message.len() <= max {
        return message;
    }
    let mut cut = max;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    message.truncate(cut);
    message.push_str("...");
    message
}
