//! Route definitions for the Vision API.
//!
//! Provides the welcome and health endpoints plus transcript upload and retrieval.

use crate::service::TranscriptionService;
use crate::validation::{mime_for_filename, MAX_AUDIO_BYTES};
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use vision_common::{Error, Transcript, TranscriptListItem};

/// Room for multipart boundaries and headers on top of the audio itself.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Default and maximum page size for listings.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranscriptionService>,
}

impl AppState {
    pub fn new(service: TranscriptionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Response for `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub status: String,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
    pub database: bool,
}

/// Paging query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// List transcripts response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTranscriptsResponse {
    pub items: Vec<TranscriptListItem>,
    pub total: u64,
    pub skip: u32,
    pub limit: u32,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: &Error) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().into(),
        }),
    )
}

/// Build the complete router with all routes and the shared state applied.
pub fn build_all_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .merge(health_routes())
        .merge(transcript_routes())
        .with_state(state)
}

/// Health endpoints.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/health", get(health_handler))
}

/// Transcript upload and retrieval endpoints.
pub fn transcript_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/transcripts",
            post(create_transcript_handler)
                .get(list_transcripts_handler)
                .layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route("/api/v1/transcripts/:id", get(get_transcript_handler))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn welcome_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        status: "ok".into(),
        message: "Welcome to Whisper AI Vision API - Backend".into(),
    })
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.service.store().health_check().await;
    Json(HealthResponse {
        status: (if database { "healthy" } else { "degraded" }).to_string(),
        version: env!("CARGO_PKG_VERSION").into(),
        service: "vision-api".into(),
        database,
    })
}

/// Accept a multipart upload with a `file` field and transcribe it.
async fn create_transcript_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Transcript>), ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            e.status(),
            Json(ErrorResponse {
                error: e.body_text(),
                code: "invalid_multipart".into(),
            }),
        )
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or("upload")
            .to_string();
        let mime_type = field
            .content_type()
            .filter(|mime| *mime != "application/octet-stream")
            .map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            (
                e.status(),
                Json(ErrorResponse {
                    error: e.body_text(),
                    code: "invalid_multipart".into(),
                }),
            )
        })?;

        upload = Some((filename, mime_type, bytes));
        break;
    }

    let (filename, mime_type, bytes) = upload.ok_or_else(|| {
        error_response(&Error::InvalidInput("multipart field 'file' is required".into()))
    })?;
    let mime_type = mime_type.unwrap_or_else(|| mime_for_filename(&filename).to_string());

    let transcript = state
        .service
        .transcribe(&filename, &bytes, &mime_type)
        .await
        .map_err(|e| error_response(&e))?;

    Ok((StatusCode::CREATED, Json(transcript)))
}

async fn list_transcripts_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListTranscriptsResponse>, ApiError> {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let store = state.service.store();

    let items = store
        .list_transcript_items(skip, limit)
        .await
        .map_err(|e| error_response(&Error::from(e)))?;
    let total = store
        .count_transcripts()
        .await
        .map_err(|e| error_response(&Error::from(e)))?;

    Ok(Json(ListTranscriptsResponse {
        items,
        total,
        skip,
        limit,
    }))
}

async fn get_transcript_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transcript>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| {
        error_response(&Error::InvalidInput(format!("'{id}' is not a valid transcript id")))
    })?;

    state
        .service
        .store()
        .get_transcript_by_id(id)
        .await
        .map_err(|e| error_response(&Error::from(e)))?
        .map(Json)
        .ok_or_else(|| error_response(&Error::NotFound(format!("transcript {id}"))))
}
