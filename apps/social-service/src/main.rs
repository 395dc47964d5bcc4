//! Social event publishing service.
//!
//! Exposes the social action endpoints over HTTP and publishes each action
//! to Kafka before answering.

mod config;
mod logging;

use config::Config;
use social_api::{social_router, SocialState};
use social_events::{EventProducer, KafkaBroker};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    let addr = config.socket_addr();
    let topic = config.kafka.topic.clone();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        %addr,
        topic = %topic,
        "Starting social service"
    );

    let broker = match KafkaBroker::new(config.kafka) {
        Ok(b) => Arc::new(b),
        Err(e) => {
            tracing::error!("Failed to create Kafka producer: {e}");
            std::process::exit(1);
        }
    };

    let producer = EventProducer::new(broker.clone(), topic);
    let app = social_router(SocialState::new(producer)).layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Flushing in-flight events...");
    if let Err(e) = broker.flush(FLUSH_TIMEOUT) {
        tracing::warn!("Kafka flush did not complete: {e}");
    }
    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining requests");
}
