//! # attune-runtime
//!
//! The question-answering pipeline. [`service::AgentService`] wires the
//! stages together: transcript resolution and ownership, sanitization,
//! token-threshold chunking with bounded summarization fan-out, context
//! assembly, the answer call, and the memory/audit writes that follow it.
//!
//! Storage is abstracted behind the traits in [`stores`] so the pipeline
//! can be tested end to end with in-process fakes.

#![deny(unsafe_code)]

pub mod context;
pub mod fanout;
pub mod prompts;
pub mod service;
pub mod stores;

pub use context::{ContextBlock, ContextObject, assemble_context, flatten_context};
pub use fanout::{FanoutConfig, SUMMARY_UNAVAILABLE, summarize_chunks};
pub use service::{AgentConfig, AgentService, AnswerResponse, TranscriptView};
pub use stores::{AuditStore, ConversationMemory, MemoryKey, TranscriptStore};
