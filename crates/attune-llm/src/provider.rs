//! Chat provider boundary.
//!
//! [`ChatProvider`] is the seam between the pipeline and a concrete LLM
//! backend: an ordered sequence of role-tagged messages in, a single text
//! completion out. Abstracted as a trait so the runtime can be exercised
//! with in-process fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Wire messages
// ─────────────────────────────────────────────────────────────────────────────

/// Message role on the chat-completion wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions and context blocks.
    System,
    /// The end user's input.
    User,
    /// Prior model output.
    Assistant,
}

/// One role-tagged message sent to the chat endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role.
    pub role: ChatRole,
    /// Message body.
    pub content: String,
}

impl ChatMessage {
    /// Create a system-role message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user-role message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from a chat-completion call.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The API asked us to back off.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Error message extracted from the response body.
        message: String,
    },

    /// 2xx response that did not contain a usable completion.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Convenience type alias for LLM results.
pub type Result<T> = std::result::Result<T, LlmError>;

// ─────────────────────────────────────────────────────────────────────────────
// Provider trait
// ─────────────────────────────────────────────────────────────────────────────

/// A chat-completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Model identifier this provider targets.
    fn model(&self) -> &str;

    /// Send the ordered message sequence and return the completion text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
