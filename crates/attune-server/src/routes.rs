//! HTTP routes and handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use attune_runtime::{AgentService, AnswerResponse, TranscriptView};

use crate::error::ApiError;
use crate::health::{self, HealthResponse};

/// Shared state accessible from handlers.
#[derive(Clone)]
pub struct AppState {
    /// The question-answering pipeline.
    pub service: Arc<AgentService>,
    /// When the server started.
    pub start_time: Instant,
    /// Configured chat model, reported by `/health`.
    pub model: String,
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/agent/transcript/question", post(question_handler))
        .route(
            "/agent/transcript/{user_id}/{transcript_id}",
            get(transcript_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Body of `POST /agent/transcript/question`.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    /// Therapist (user) UUID.
    pub user_id: String,
    /// Transcript UUID.
    pub transcript_id: String,
    /// The question, 1 to 500 characters.
    pub question: String,
}

/// Query params of the transcript view endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TranscriptParams {
    /// Skip summarization and return the transcript alone.
    #[serde(default)]
    pub only_transcript: bool,
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time, &state.model))
}

/// POST /agent/transcript/question
async fn question_handler(
    State(state): State<AppState>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let response = state
        .service
        .answer_question(&req.user_id, &req.transcript_id, &req.question)
        .await?;
    Ok(Json(response))
}

/// GET /agent/transcript/{user_id}/{transcript_id}?only_transcript=
async fn transcript_handler(
    State(state): State<AppState>,
    Path((user_id, transcript_id)): Path<(String, String)>,
    Query(params): Query<TranscriptParams>,
) -> Result<Json<TranscriptView>, ApiError> {
    let view = state
        .service
        .transcript_view(&user_id, &transcript_id, params.only_transcript)
        .await?;
    Ok(Json(view))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
