//! Vision API - audio transcription service.
//!
//! Uploaded audio is validated, sent to the speech-to-text provider, and the
//! outcome is stored as a transcript row:
//! ```text
//! Client → upload → validate → Groq STT ─┬─ ok ──→ store (completed) → id + text
//!                                        └─ err ─→ store (failed)    → error
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod routes;
pub mod service;
pub mod validation;

pub use routes::AppState;
pub use service::{audio_duration_seconds, TranscriptionService};
pub use validation::{mime_for_filename, validate_audio, MAX_AUDIO_BYTES};

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vision_common::config::Config;
use vision_store::TranscriptStore;
use vision_stt::GroqStt;

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::build_all_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Wire the provider client and store named by `config` into a service.
pub fn build_service(config: &Config) -> anyhow::Result<TranscriptionService> {
    let store = TranscriptStore::open(&config.database.url)?;
    let stt = GroqStt::new(
        config.secrets.groq_api_key.clone(),
        config.transcription.base_url.clone(),
        Some(config.transcription.model.clone()),
    );

    tracing::info!(
        model = %config.transcription.model,
        base_url = %config.transcription.base_url,
        "Speech-to-text provider configured"
    );

    Ok(TranscriptionService::new(Arc::new(stt), store))
}

/// Start the HTTP server and run until Ctrl+C.
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    let router = build_router(AppState::new(build_service(config)?));

    tracing::info!("Starting Vision API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Vision API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
