//! Broker health endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::models::HealthResponse;
use crate::router::SocialState;

/// `GET /health`: 200 while the topic is reachable, 503 otherwise.
pub async fn health(State(state): State<SocialState>) -> Response {
    let topic = state.producer.topic().to_string();

    let (status, kafka) = match state.producer.health_check().await {
        Ok(kafka) if kafka.is_healthy() => (StatusCode::OK, Some(kafka)),
        Ok(kafka) => {
            warn!(
                brokers = kafka.brokers,
                topic_present = kafka.topic_present,
                "Kafka reachable but not ready"
            );
            (StatusCode::SERVICE_UNAVAILABLE, Some(kafka))
        }
        Err(e) => {
            warn!(error = %e, "Kafka health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, None)
        }
    };

    let body = HealthResponse {
        status: if status == StatusCode::OK {
            "healthy"
        } else {
            "degraded"
        }
        .to_string(),
        topic,
        kafka,
    };

    (status, Json(body)).into_response()
}
