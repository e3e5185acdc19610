//! Error taxonomy for the attune agent.
//!
//! [`AgentError`] is the error type surfaced by the question-answering
//! pipeline. The variants map one-to-one onto the user-facing outcomes the
//! HTTP boundary must produce, so handlers can match exhaustively instead of
//! probing error strings.
//!
//! Propagation policy: per-chunk summarization failures are recovered
//! locally inside the fan-out aggregator and never become an `AgentError`.
//! Everything else (resolution, validation, the final answer call) surfaces
//! with its specific variant preserved.

use thiserror::Error;

/// Errors surfaced by the transcript question-answering pipeline.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Requested transcript or patient does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requesting user does not own the transcript.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Malformed input (empty or over-length question).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The LLM backend (or another external collaborator) failed.
    #[error("{service} error: {message}")]
    ExternalService {
        /// Which collaborator failed (e.g. "llm", "summarizer").
        service: String,
        /// Transport-level detail, logged but never shown to end users.
        message: String,
    },

    /// Anything unexpected (storage faults, poisoned invariants).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AgentError {
    /// Create an external-service error.
    #[must_use]
    pub fn external(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Convenience type alias for pipeline results.
pub type Result<T> = std::result::Result<T, AgentError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
