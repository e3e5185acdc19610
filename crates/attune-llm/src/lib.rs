//! # attune-llm
//!
//! LLM transport for the attune agent: the [`provider::ChatProvider`]
//! trait, an OpenAI-compatible implementation over reqwest, and the
//! [`summarizer::Summarizer`] used by the chunk fan-out.
//!
//! Neither client retries. Per-chunk summarization failures are the fan-out
//! aggregator's concern (degraded to placeholders); a failed answer call
//! surfaces to the caller.

#![deny(unsafe_code)]

pub mod openai;
pub mod provider;
pub mod summarizer;

pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::{ChatMessage, ChatProvider, ChatRole, LlmError, Result};
pub use summarizer::{ChatSummarizer, Summarizer};
