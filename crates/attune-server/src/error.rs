//! HTTP error mapping.
//!
//! [`ApiError`] wraps the pipeline's error type and renders it as a JSON
//! body with the right status code. External-service and internal details
//! are logged but replaced with generic messages on the wire.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use attune_core::errors::AgentError;

/// Error type returned by the HTTP handlers.
#[derive(Debug)]
pub struct ApiError(pub AgentError);

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AgentError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AgentError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AgentError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AgentError::ExternalService { service, message } => {
                error!(service, message, "external service failure");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{service} service unavailable"),
                )
            }
            AgentError::Internal(msg) => {
                error!(message = msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
