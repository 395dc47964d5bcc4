//! # social-events
//!
//! Social event publishing for the gaming platform.
//!
//! Builds canonical social events (friend request, friend acceptance, new
//! follower), serializes them to the JSON wire envelope and publishes them to a
//! single Kafka topic keyed by the subject player, so every event about one
//! player lands on one partition in submission order.
//!
//! ## Cargo Features
//!
//! - `kafka`: Enable the librdkafka-backed [`BrokerClient`]
//! - `kafka-static`: Build librdkafka from source (requires cmake)
//! - `test-support`: In-memory broker and codec doubles
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use social_events::{DeliveryOutcome, EventProducer, KafkaBroker, KafkaConfig};
//!
//! let config = KafkaConfig::from_env()?;
//! let topic = config.topic.clone();
//! let broker = Arc::new(KafkaBroker::new(config)?);
//! let producer = EventProducer::new(broker, topic);
//!
//! match producer.send_friend_request(123, 456).outcome().await {
//!     DeliveryOutcome::Delivered(receipt) => println!("offset {}", receipt.offset),
//!     DeliveryOutcome::Failed(failure) => eprintln!("{}", failure.message),
//! }
//! ```

pub mod broker;
pub mod codec;
pub mod config;
pub mod error;
pub mod event;
pub mod factory;
pub mod health;
pub mod outcome;
pub mod producer;

#[cfg(feature = "kafka")]
pub mod kafka;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use broker::{BrokerAck, BrokerClient, DeliveryFuture};
pub use codec::{EventCodec, JsonCodec};
pub use config::{KafkaConfig, KafkaConfigBuilder};
pub use error::EventError;
pub use event::{EventCategory, EventData, PlayerId, SocialEvent, SocialEventType};
pub use health::HealthStatus;
pub use outcome::{DeliveryFailure, DeliveryOutcome, DeliveryReceipt};
pub use producer::{EventProducer, PendingDelivery};

#[cfg(feature = "kafka")]
pub use kafka::KafkaBroker;
