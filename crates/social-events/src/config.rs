//! Kafka producer configuration.

use crate::error::EventError;
use std::env;
use std::str::FromStr;

/// Default destination topic for social events.
pub const DEFAULT_TOPIC: &str = "social-events";

/// Default number of transport-level retries performed by the client.
pub const DEFAULT_RETRIES: u32 = 3;

/// Default upper bound for a delivery, including retries.
pub const DEFAULT_MESSAGE_TIMEOUT_MS: u64 = 30_000;

const DEFAULT_CLIENT_ID: &str = "social-service";

/// Security protocol for Kafka connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityProtocol {
    /// Plaintext connection (no encryption or auth).
    Plaintext,
    /// SSL encryption without SASL auth.
    Ssl,
    /// SASL authentication without encryption.
    SaslPlaintext,
    /// SASL authentication with SSL encryption.
    SaslSsl,
}

impl FromStr for SecurityProtocol {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLAINTEXT" => Ok(Self::Plaintext),
            "SSL" => Ok(Self::Ssl),
            "SASL_PLAINTEXT" => Ok(Self::SaslPlaintext),
            "SASL_SSL" => Ok(Self::SaslSsl),
            _ => Err(EventError::ConfigInvalid {
                var: "KAFKA_SECURITY_PROTOCOL".to_string(),
                reason: format!("Unknown protocol: {s}"),
            }),
        }
    }
}

impl SecurityProtocol {
    /// Convert to rdkafka string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plaintext => "PLAINTEXT",
            Self::Ssl => "SSL",
            Self::SaslPlaintext => "SASL_PLAINTEXT",
            Self::SaslSsl => "SASL_SSL",
        }
    }

    fn requires_sasl(&self) -> bool {
        matches!(self, Self::SaslPlaintext | Self::SaslSsl)
    }
}

/// SASL mechanism for authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaslMechanism {
    Plain,
    ScramSha256,
    ScramSha512,
}

impl FromStr for SaslMechanism {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "PLAIN" => Ok(Self::Plain),
            "SCRAM_SHA_256" => Ok(Self::ScramSha256),
            "SCRAM_SHA_512" => Ok(Self::ScramSha512),
            _ => Err(EventError::ConfigInvalid {
                var: "KAFKA_SASL_MECHANISM".to_string(),
                reason: format!("Unknown mechanism: {s}"),
            }),
        }
    }
}

impl SaslMechanism {
    /// Convert to rdkafka string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "PLAIN",
            Self::ScramSha256 => "SCRAM-SHA-256",
            Self::ScramSha512 => "SCRAM-SHA-512",
        }
    }
}

/// SASL credentials for authentication.
#[derive(Clone)]
pub struct SaslCredentials {
    pub mechanism: SaslMechanism,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SaslCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaslCredentials")
            .field("mechanism", &self.mechanism)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Kafka producer configuration.
///
/// The delivery policy is not configurable: every record needs the ack of all
/// in-sync replicas and the idempotent producer is always on, so client
/// retries never create duplicate records.
#[derive(Debug, Clone)]
pub struct KafkaConfig {
    /// Comma-separated list of broker addresses.
    pub bootstrap_servers: String,
    /// Security protocol.
    pub security_protocol: SecurityProtocol,
    /// SASL credentials (required if using SASL).
    pub sasl: Option<SaslCredentials>,
    /// Client identifier.
    pub client_id: String,
    /// Destination topic for every social event.
    pub topic: String,
    /// Transport-level retries performed by the client.
    pub retries: u32,
    /// Time allowed for a delivery before it is reported failed.
    pub message_timeout_ms: u64,
}

impl KafkaConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `KAFKA_BOOTSTRAP_SERVERS`: Comma-separated broker list
    ///
    /// Optional:
    /// - `KAFKA_SECURITY_PROTOCOL`: PLAINTEXT (default), SSL, `SASL_PLAINTEXT`, `SASL_SSL`
    /// - `KAFKA_CLIENT_ID`: Client identifier (default: "social-service")
    /// - `KAFKA_SASL_MECHANISM`: PLAIN, SCRAM-SHA-256, SCRAM-SHA-512 (required if SASL)
    /// - `KAFKA_SASL_USERNAME`: SASL username (required if SASL)
    /// - `KAFKA_SASL_PASSWORD`: SASL password (required if SASL)
    /// - `KAFKA_TOPIC`: Destination topic (default: "social-events")
    /// - `KAFKA_PRODUCER_RETRIES`: Client retries (default: 3)
    /// - `KAFKA_MESSAGE_TIMEOUT_MS`: Delivery timeout (default: 30000)
    pub fn from_env() -> Result<Self, EventError> {
        let bootstrap_servers =
            env::var("KAFKA_BOOTSTRAP_SERVERS").map_err(|_| EventError::ConfigMissing {
                var: "KAFKA_BOOTSTRAP_SERVERS".to_string(),
            })?;

        let security_protocol = match env::var("KAFKA_SECURITY_PROTOCOL") {
            Ok(v) => SecurityProtocol::from_str(&v)?,
            Err(_) => SecurityProtocol::Plaintext,
        };

        let sasl = if security_protocol.requires_sasl() {
            let mechanism = SaslMechanism::from_str(&required_var("KAFKA_SASL_MECHANISM")?)?;
            Some(SaslCredentials {
                mechanism,
                username: required_var("KAFKA_SASL_USERNAME")?,
                password: required_var("KAFKA_SASL_PASSWORD")?,
            })
        } else {
            None
        };

        Ok(Self {
            bootstrap_servers,
            security_protocol,
            sasl,
            client_id: env::var("KAFKA_CLIENT_ID")
                .unwrap_or_else(|_| DEFAULT_CLIENT_ID.to_string()),
            topic: env::var("KAFKA_TOPIC").unwrap_or_else(|_| DEFAULT_TOPIC.to_string()),
            retries: parsed_var("KAFKA_PRODUCER_RETRIES", DEFAULT_RETRIES)?,
            message_timeout_ms: parsed_var(
                "KAFKA_MESSAGE_TIMEOUT_MS",
                DEFAULT_MESSAGE_TIMEOUT_MS,
            )?,
        })
    }

    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> KafkaConfigBuilder {
        KafkaConfigBuilder::new()
    }

    /// librdkafka properties for the producer, delivery policy included.
    #[must_use]
    pub fn producer_properties(&self) -> Vec<(&'static str, String)> {
        let mut props = vec![
            ("bootstrap.servers", self.bootstrap_servers.clone()),
            ("client.id", self.client_id.clone()),
            ("security.protocol", self.security_protocol.as_str().to_string()),
            ("acks", "all".to_string()),
            ("enable.idempotence", "true".to_string()),
            ("retries", self.retries.to_string()),
            ("message.timeout.ms", self.message_timeout_ms.to_string()),
        ];

        if let Some(sasl) = &self.sasl {
            props.push(("sasl.mechanism", sasl.mechanism.as_str().to_string()));
            props.push(("sasl.username", sasl.username.clone()));
            props.push(("sasl.password", sasl.password.clone()));
        }

        props
    }
}

fn required_var(var: &str) -> Result<String, EventError> {
    env::var(var).map_err(|_| EventError::ConfigMissing {
        var: var.to_string(),
    })
}

fn parsed_var<T: FromStr>(var: &str, default: T) -> Result<T, EventError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| EventError::ConfigInvalid {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Builder for `KafkaConfig`.
#[derive(Debug, Default)]
pub struct KafkaConfigBuilder {
    bootstrap_servers: Option<String>,
    security_protocol: Option<SecurityProtocol>,
    sasl: Option<SaslCredentials>,
    client_id: Option<String>,
    topic: Option<String>,
    retries: Option<u32>,
    message_timeout_ms: Option<u64>,
}

impl KafkaConfigBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bootstrap servers.
    pub fn bootstrap_servers(mut self, servers: impl Into<String>) -> Self {
        self.bootstrap_servers = Some(servers.into());
        self
    }

    /// Set security protocol.
    #[must_use]
    pub fn security_protocol(mut self, protocol: SecurityProtocol) -> Self {
        self.security_protocol = Some(protocol);
        self
    }

    /// Set SASL credentials.
    #[must_use]
    pub fn sasl(mut self, mechanism: SaslMechanism, username: String, password: String) -> Self {
        self.sasl = Some(SaslCredentials {
            mechanism,
            username,
            password,
        });
        self
    }

    /// Set client ID.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set destination topic.
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    #[must_use]
    pub fn message_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.message_timeout_ms = Some(timeout_ms);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<KafkaConfig, EventError> {
        let bootstrap_servers = self.bootstrap_servers.ok_or(EventError::ConfigMissing {
            var: "bootstrap_servers".to_string(),
        })?;

        let security_protocol = self
            .security_protocol
            .unwrap_or(SecurityProtocol::Plaintext);

        if security_protocol.requires_sasl() && self.sasl.is_none() {
            return Err(EventError::ConfigMissing {
                var: "sasl_credentials".to_string(),
            });
        }

        let topic = self.topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string());
        if topic.trim().is_empty() {
            return Err(EventError::ConfigInvalid {
                var: "topic".to_string(),
                reason: "topic name is empty".to_string(),
            });
        }

        Ok(KafkaConfig {
            bootstrap_servers,
            security_protocol,
            sasl: self.sasl,
            client_id: self
                .client_id
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            topic,
            retries: self.retries.unwrap_or(DEFAULT_RETRIES),
            message_timeout_ms: self
                .message_timeout_ms
                .unwrap_or(DEFAULT_MESSAGE_TIMEOUT_MS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop<'a>(props: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        props
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_security_protocol_from_str() {
        assert_eq!(
            "PLAINTEXT".parse::<SecurityProtocol>().unwrap(),
            SecurityProtocol::Plaintext
        );
        assert_eq!(
            "sasl_ssl".parse::<SecurityProtocol>().unwrap(),
            SecurityProtocol::SaslSsl
        );
        assert!("INVALID".parse::<SecurityProtocol>().is_err());
    }

    #[test]
    fn test_sasl_mechanism_from_str() {
        assert_eq!(
            "SCRAM-SHA-512".parse::<SaslMechanism>().unwrap(),
            SaslMechanism::ScramSha512
        );
        assert!("INVALID".parse::<SaslMechanism>().is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let config = KafkaConfig::builder()
            .bootstrap_servers("localhost:9092")
            .build()
            .unwrap();

        assert_eq!(config.bootstrap_servers, "localhost:9092");
        assert_eq!(config.security_protocol, SecurityProtocol::Plaintext);
        assert_eq!(config.client_id, "social-service");
        assert_eq!(config.topic, DEFAULT_TOPIC);
        assert_eq!(config.retries, 3);
        assert_eq!(config.message_timeout_ms, DEFAULT_MESSAGE_TIMEOUT_MS);
        assert!(config.sasl.is_none());
    }

    #[test]
    fn test_builder_missing_servers() {
        let result = KafkaConfig::builder().build();
        if let Err(EventError::ConfigMissing { var }) = result {
            assert_eq!(var, "bootstrap_servers");
        } else {
            panic!("Expected ConfigMissing error");
        }
    }

    #[test]
    fn test_builder_sasl_without_credentials() {
        let result = KafkaConfig::builder()
            .bootstrap_servers("localhost:9092")
            .security_protocol(SecurityProtocol::SaslSsl)
            .build();

        if let Err(EventError::ConfigMissing { var }) = result {
            assert_eq!(var, "sasl_credentials");
        } else {
            panic!("Expected ConfigMissing error");
        }
    }

    #[test]
    fn test_builder_rejects_blank_topic() {
        let result = KafkaConfig::builder()
            .bootstrap_servers("localhost:9092")
            .topic("  ")
            .build();

        assert!(matches!(result, Err(EventError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_producer_properties_enforce_delivery_policy() {
        let config = KafkaConfig::builder()
            .bootstrap_servers("broker-1:9092,broker-2:9092")
            .retries(5)
            .message_timeout_ms(10_000)
            .build()
            .unwrap();

        let props = config.producer_properties();

        assert_eq!(prop(&props, "acks"), Some("all"));
        assert_eq!(prop(&props, "enable.idempotence"), Some("true"));
        assert_eq!(prop(&props, "retries"), Some("5"));
        assert_eq!(prop(&props, "message.timeout.ms"), Some("10000"));
        assert_eq!(
            prop(&props, "bootstrap.servers"),
            Some("broker-1:9092,broker-2:9092")
        );
        assert_eq!(prop(&props, "sasl.mechanism"), None);
    }

    #[test]
    fn test_producer_properties_with_sasl() {
        let config = KafkaConfig::builder()
            .bootstrap_servers("broker.example.com:9093")
            .security_protocol(SecurityProtocol::SaslSsl)
            .sasl(
                SaslMechanism::ScramSha256,
                "user".to_string(),
                "pass".to_string(),
            )
            .build()
            .unwrap();

        let props = config.producer_properties();

        assert_eq!(prop(&props, "security.protocol"), Some("SASL_SSL"));
        assert_eq!(prop(&props, "sasl.mechanism"), Some("SCRAM-SHA-256"));
        assert_eq!(prop(&props, "sasl.username"), Some("user"));
    }

    #[test]
    fn test_sasl_password_not_in_debug() {
        let creds = SaslCredentials {
            mechanism: SaslMechanism::Plain,
            username: "user".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn test_from_env_missing_bootstrap() {
        env::remove_var("KAFKA_BOOTSTRAP_SERVERS");
        let result = KafkaConfig::from_env();
        assert!(result.is_err());
    }
}
