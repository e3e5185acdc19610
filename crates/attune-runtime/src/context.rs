//! Two-stage context assembly.
//!
//! Stage one builds a structured [`ContextObject`]: the system instructions,
//! an ordered list of named context blocks, and the user's question. Stage
//! two flattens that object into the provider's message sequence. The
//! structured form is what gets snapshotted into the audit log, so the exact
//! context of every answer is reconstructible.
//!
//! Block order is fixed: Transcript, Session Metadata, then Previous Q&A
//! when history exists. Assembly is pure; the same inputs always produce
//! the same message sequence.

use serde::{Deserialize, Serialize};

use attune_core::records::{MemoryEntry, MemoryRole, SessionMetadata};
use attune_llm::{ChatMessage, ChatRole};

use crate::prompts::AGENT_SYSTEM_PROMPT;

/// Context object schema version.
pub const CONTEXT_VERSION: &str = "v1";

/// A named block of context carried to the model as a system message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextBlock {
    /// Block label, rendered as a `"{name}:"` prefix when flattened.
    pub name: String,
    /// Message role the block flattens to.
    pub role: ChatRole,
    /// Block body.
    pub content: String,
}

/// Structured model context: system instructions, ordered blocks, input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextObject {
    /// Schema version, always [`CONTEXT_VERSION`].
    pub version: String,
    /// System instructions.
    pub system: String,
    /// Ordered context blocks.
    pub context: Vec<ContextBlock>,
    /// The user's question, verbatim.
    pub input: String,
}

/// Build the context object for a question.
///
/// `transcript` is whatever representation survived the summarization
/// decision: raw sanitized text under the threshold, joined chunk summaries
/// above it. `history` entries render as a Previous Q&A block after the
/// metadata; an empty history produces no block at all.
#[must_use]
pub fn assemble_context(
    transcript: &str,
    metadata: &SessionMetadata,
    question: &str,
    history: &[MemoryEntry],
) -> ContextObject {
    let mut blocks = vec![
        ContextBlock {
            name: "Transcript".into(),
            role: ChatRole::System,
            content: transcript.to_owned(),
        },
        ContextBlock {
            name: "Session Metadata".into(),
            role: ChatRole::System,
            content: metadata
                .fields()
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("\n"),
        },
    ];

    if let Some(block) = history_block(history) {
        blocks.push(block);
    }

    ContextObject {
        version: CONTEXT_VERSION.into(),
        system: AGENT_SYSTEM_PROMPT.into(),
        context: blocks,
        input: question.to_owned(),
    }
}

/// Render conversation history as a Previous Q&A block, or `None` if empty.
#[must_use]
pub fn history_block(history: &[MemoryEntry]) -> Option<ContextBlock> {
    if history.is_empty() {
        return None;
    }

    let mut content = String::new();
    for entry in history {
        let label = match entry.role {
            MemoryRole::Asker => "Therapist",
            MemoryRole::Responder => "Agent",
        };
        content.push_str(&format!("[{label}]: {}\n", entry.text));
    }

    Some(ContextBlock {
        name: "Previous Q&A".into(),
        role: ChatRole::System,
        content: content.trim().to_owned(),
    })
}

/// Flatten a context object into the provider message sequence.
///
/// System instructions first, each block as a `"{name}:\n{content}"` message
/// in block order, and the verbatim question as the final user message.
#[must_use]
pub fn flatten_context(ctx: &ContextObject) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(ctx.context.len() + 2);
    messages.push(ChatMessage::system(&ctx.system));

    for block in &ctx.context {
        messages.push(ChatMessage {
            role: block.role,
            content: format!("{}:\n{}", block.name, block.content),
        });
    }

    messages.push(ChatMessage::user(&ctx.input));
    messages
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
