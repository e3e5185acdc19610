//! The question-answering pipeline.
//!
//! [`AgentService::answer_question`] runs the full flow for one question:
//! resolve and authorize the transcript, sanitize it, decide between the raw
//! text and a chunked summary representation by token estimate, assemble
//! the context, call the model, then record the exchange in conversation
//! memory and the audit log.
//!
//! The two post-answer writes are best-effort: once the model has produced
//! an answer, a failing memory or audit write is logged and the answer is
//! still returned.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use attune_core::chunk::chunk_transcript;
use attune_core::errors::{AgentError, Result};
use attune_core::records::{AuditRecord, PatientRecord, SessionMetadata, TranscriptRecord};
use attune_core::text::{format_session_date, sanitize_transcript};
use attune_core::tokens::estimate_tokens;
use attune_llm::{ChatProvider, Summarizer};

use crate::context::{assemble_context, flatten_context};
use crate::fanout::{FanoutConfig, summarize_chunks};
use crate::stores::{AuditStore, ConversationMemory, MemoryKey, TranscriptStore};

/// Maximum question length in characters.
pub const MAX_QUESTION_CHARS: usize = 500;

/// Pipeline configuration.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Token estimate at or above which a transcript is chunked and
    /// summarized instead of sent raw.
    pub max_summary_tokens: u32,
    /// Conversation memory retention, in question/answer pairs.
    pub history_pairs: u32,
    /// Summarization fan-out tuning.
    pub fanout: FanoutConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_summary_tokens: 10_000,
            history_pairs: 6,
            fanout: FanoutConfig::default(),
        }
    }
}

/// Answer to one question.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerResponse {
    /// The model's answer, trimmed.
    pub answer: String,
}

/// Raw transcript plus an optional summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptView {
    /// Sanitized transcript text.
    pub transcript: String,
    /// Summary, omitted when the caller asked for the transcript only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// The transcript question-answering service.
pub struct AgentService {
    transcripts: Arc<dyn TranscriptStore>,
    memory: Arc<dyn ConversationMemory>,
    audit: Arc<dyn AuditStore>,
    provider: Arc<dyn ChatProvider>,
    summarizer: Arc<dyn Summarizer>,
    config: AgentConfig,
}

impl AgentService {
    /// Wire up the pipeline.
    pub fn new(
        transcripts: Arc<dyn TranscriptStore>,
        memory: Arc<dyn ConversationMemory>,
        audit: Arc<dyn AuditStore>,
        provider: Arc<dyn ChatProvider>,
        summarizer: Arc<dyn Summarizer>,
        config: AgentConfig,
    ) -> Self {
        Self {
            transcripts,
            memory,
            audit,
            provider,
            summarizer,
            config,
        }
    }

    /// Answer a question about a transcript.
    #[instrument(skip(self, question))]
    pub async fn answer_question(
        &self,
        user_id: &str,
        transcript_id: &str,
        question: &str,
    ) -> Result<AnswerResponse> {
        validate_question(question)?;

        let (transcript, patient) = self.fetch_owned(transcript_id, user_id).await?;
        let sanitized = sanitize_transcript(&transcript.content);

        // Raw text under the threshold, joined chunk summaries above it.
        let token_count = estimate_tokens(&sanitized);
        let content = if token_count < self.config.max_summary_tokens {
            debug!(token_count, "transcript under threshold, sending raw");
            sanitized.clone()
        } else {
            let chunks = chunk_transcript(&sanitized, token_count, self.config.max_summary_tokens);
            info!(token_count, chunk_count = chunks.len(), "summarizing chunks");
            summarize_chunks(self.summarizer.as_ref(), &chunks, &self.config.fanout)
                .await
                .join("\n\n")
        };

        let metadata = self.compile_metadata(&transcript, &patient).await?;

        let key = MemoryKey::new(user_id, transcript_id);
        let history = self
            .memory
            .history(&key, self.config.history_pairs)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "history fetch failed, continuing without it");
                Vec::new()
            });

        let ctx = assemble_context(&content, &metadata, question, &history);
        let messages = flatten_context(&ctx);

        let answer = self
            .provider
            .complete(&messages)
            .await
            .map_err(|e| AgentError::external("llm", e.to_string()))?;
        let answer = answer.trim().to_owned();

        if let Err(e) = self
            .memory
            .append(&key, question, &answer, self.config.history_pairs)
            .await
        {
            warn!(error = %e, "memory append failed, answer still returned");
        }

        // The structured object, not the flattened messages, is the
        // auditable artifact.
        let snapshot = serde_json::to_string(&ctx)
            .map_err(|e| AgentError::internal(format!("snapshot serialization: {e}")))?;
        let record = AuditRecord {
            transcript_id: transcript.id,
            question: question.to_owned(),
            answer: answer.clone(),
            model_used: self.provider.model().to_owned(),
            prompt_snapshot: snapshot,
            created_at: Utc::now(),
        };
        if let Err(e) = self.audit.append(&record).await {
            warn!(error = %e, "audit append failed, answer still returned");
        }

        Ok(AnswerResponse { answer })
    }

    /// Fetch a transcript with an optional summary of it.
    ///
    /// With `only_transcript`, no model calls happen at all. Otherwise a
    /// transcript under the threshold gets one concise single-sentence
    /// summary; an oversized one gets per-chunk summaries joined together.
    #[instrument(skip(self))]
    pub async fn transcript_view(
        &self,
        user_id: &str,
        transcript_id: &str,
        only_transcript: bool,
    ) -> Result<TranscriptView> {
        let (transcript, _) = self.fetch_owned(transcript_id, user_id).await?;
        let sanitized = sanitize_transcript(&transcript.content);

        if only_transcript {
            return Ok(TranscriptView {
                transcript: sanitized,
                summary: None,
            });
        }

        let token_count = estimate_tokens(&sanitized);
        let summary = if token_count <= self.config.max_summary_tokens {
            self.summarizer
                .summarize(&sanitized, true)
                .await
                .map_err(|e| AgentError::external("summarizer", e.to_string()))?
        } else {
            let chunks = chunk_transcript(&sanitized, token_count, self.config.max_summary_tokens);
            summarize_chunks(self.summarizer.as_ref(), &chunks, &self.config.fanout)
                .await
                .join("\n\n")
        };

        Ok(TranscriptView {
            transcript: sanitized,
            summary: Some(summary),
        })
    }

    /// Resolve a transcript and enforce that `user_id` owns it.
    async fn fetch_owned(
        &self,
        transcript_id: &str,
        user_id: &str,
    ) -> Result<(TranscriptRecord, PatientRecord)> {
        let transcript = self
            .transcripts
            .transcript_by_uuid(transcript_id)
            .await?
            .ok_or_else(|| AgentError::NotFound(format!("transcript {transcript_id}")))?;

        // Should not be reachable with foreign keys intact.
        let patient = self
            .transcripts
            .patient_by_id(transcript.patient_id)
            .await?
            .ok_or_else(|| {
                AgentError::NotFound(format!(
                    "patient {} for transcript {transcript_id}",
                    transcript.patient_id
                ))
            })?;

        let owner = self.transcripts.therapist_by_uuid(user_id).await?;
        let owns = owner.is_some_and(|t| t.id == patient.therapist_id);
        if !owns {
            return Err(AgentError::Forbidden(format!(
                "no access to transcript {transcript_id}"
            )));
        }

        Ok((transcript, patient))
    }

    /// Derive the session metadata block for one request.
    async fn compile_metadata(
        &self,
        transcript: &TranscriptRecord,
        patient: &PatientRecord,
    ) -> Result<SessionMetadata> {
        let therapist = self
            .transcripts
            .therapist_by_id(patient.therapist_id)
            .await?
            .ok_or_else(|| AgentError::NotFound(format!("therapist {}", patient.therapist_id)))?;

        Ok(SessionMetadata {
            patient_name: patient.display_name(),
            patient_email: patient.email.clone(),
            patient_first_session_date: format_session_date(patient.first_session_date),
            session_date: format_session_date(transcript.created_at),
            therapist_name: therapist.name,
        })
    }
}

/// Reject blank and over-length questions.
fn validate_question(question: &str) -> Result<()> {
    if question.trim().is_empty() {
        return Err(AgentError::Validation("question is empty".into()));
    }
    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(AgentError::Validation(format!(
            "question exceeds {MAX_QUESTION_CHARS} characters"
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
