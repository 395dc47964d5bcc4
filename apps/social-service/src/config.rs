//! Service configuration loaded from environment variables.
//!
//! Loading is fail-fast: a missing or malformed value stops startup with a
//! message naming the variable.

use social_events::{EventError, KafkaConfig};
use std::env;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info,social_service=debug,social_api=debug,social_events=debug";

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

impl From<EventError> for ConfigError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::ConfigMissing { var } => Self::MissingVar(var),
            EventError::ConfigInvalid { var, reason } => Self::InvalidValue {
                var,
                message: reason,
            },
            other => Self::InvalidValue {
                var: "KAFKA".to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Default log filter, overridden by `RUST_LOG`.
    pub rust_log: String,
    pub kafka: KafkaConfig,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// - `HOST` (default `0.0.0.0`)
    /// - `PORT` (default `8080`)
    /// - `RUST_LOG` (default service crates at debug, everything else at info)
    /// - `KAFKA_*`: see [`KafkaConfig::from_env`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let host_raw = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let host = host_raw
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: "HOST".to_string(),
                message: e.to_string(),
            })?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>()?,
            Err(_) => DEFAULT_PORT,
        };

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            host,
            port,
            rust_log,
            kafka: KafkaConfig::from_env()?,
        })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
