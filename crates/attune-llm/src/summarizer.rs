//! Chunk summarization.
//!
//! [`Summarizer`] is what the fan-out layer calls per chunk. The concrete
//! [`ChatSummarizer`] wraps any [`ChatProvider`] with a fixed prompt; the
//! `concise` flag tightens the output to a single short sentence, used for
//! the transcript overview endpoint.

use async_trait::async_trait;
use tracing::debug;

use crate::provider::{ChatMessage, ChatProvider, Result};

/// Default summary prompt.
const SUMMARY_PROMPT: &str = "Write a concise summary of the following:";

/// Tightened prompt used when `concise` is requested.
const CONCISE_PROMPT: &str =
    "Summarize the following text concisely in no more than one sentence and no more than 30 words:";

/// Summarizes a piece of transcript text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a summary of `text`. With `concise`, the result is held to
    /// one sentence of at most 30 words.
    async fn summarize(&self, text: &str, concise: bool) -> Result<String>;
}

/// [`Summarizer`] backed by a chat provider.
pub struct ChatSummarizer<P> {
    provider: P,
}

impl<P: ChatProvider> ChatSummarizer<P> {
    /// Wrap `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn build_prompt(text: &str, concise: bool) -> String {
        if concise {
            format!("{CONCISE_PROMPT}\n\n{text}\n\nSummary:")
        } else {
            format!("{SUMMARY_PROMPT}\n\n{text}\n\nCONCISE SUMMARY:")
        }
    }
}

#[async_trait]
impl<P: ChatProvider> Summarizer for ChatSummarizer<P> {
    async fn summarize(&self, text: &str, concise: bool) -> Result<String> {
        debug!(chars = text.len(), concise, "summarizing chunk");
        let prompt = Self::build_prompt(text, concise);
        let messages = [ChatMessage::user(prompt)];
        let summary = self.provider.complete(&messages).await?;
        Ok(summary.trim().to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ChatRole, LlmError};
    use std::sync::Mutex;

    /// Records the messages it receives and replays a canned response.
    struct RecordingProvider {
        response: std::result::Result<String, ()>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl RecordingProvider {
        fn replying(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for RecordingProvider {
        fn model(&self) -> &str {
            "test-model"
        }

        async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(LlmError::Api {
                    status: 500,
                    message: "boom".into(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn sends_single_user_message_containing_text() {
        let provider = RecordingProvider::replying("a summary");
        let summarizer = ChatSummarizer::new(provider);
        let result = summarizer
            .summarize("[Speaker:1] I felt better this week.", false)
            .await
            .unwrap();
        assert_eq!(result, "a summary");

        let seen = summarizer.provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[0][0].role, ChatRole::User);
        assert!(seen[0][0].content.contains("I felt better this week."));
    }

    #[tokio::test]
    async fn concise_flag_switches_prompt() {
        let provider = RecordingProvider::replying("short");
        let summarizer = ChatSummarizer::new(provider);
        let _ = summarizer.summarize("session text", true).await.unwrap();

        let seen = summarizer.provider.seen.lock().unwrap();
        assert!(seen[0][0].content.contains("no more than 30 words"));
        assert!(seen[0][0].content.ends_with("Summary:"));
    }

    #[tokio::test]
    async fn default_prompt_asks_for_concise_summary() {
        let provider = RecordingProvider::replying("s");
        let summarizer = ChatSummarizer::new(provider);
        let _ = summarizer.summarize("session text", false).await.unwrap();

        let seen = summarizer.provider.seen.lock().unwrap();
        assert!(seen[0][0].content.starts_with(SUMMARY_PROMPT));
        assert!(seen[0][0].content.ends_with("CONCISE SUMMARY:"));
    }

    #[tokio::test]
    async fn trims_provider_output() {
        let provider = RecordingProvider::replying("  padded  ");
        let summarizer = ChatSummarizer::new(provider);
        let result = summarizer.summarize("text", false).await.unwrap();
        assert_eq!(result, "padded");
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let summarizer = ChatSummarizer::new(RecordingProvider::failing());
        let err = summarizer.summarize("text", false).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 500, .. }));
    }
}
