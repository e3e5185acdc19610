//! Storage traits the pipeline depends on.
//!
//! Concrete implementations live with the server wiring; the pipeline only
//! sees these seams, which keeps it testable with in-process fakes.

use async_trait::async_trait;

use attune_core::errors::Result;
use attune_core::records::{
    AuditRecord, MemoryEntry, PatientRecord, TherapistRecord, TranscriptRecord,
};

/// Key identifying one conversation: a user asking about one transcript.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemoryKey {
    /// Therapist (user) UUID.
    pub user_id: String,
    /// Transcript UUID.
    pub transcript_id: String,
}

impl MemoryKey {
    /// Create a key.
    #[must_use]
    pub fn new(user_id: impl Into<String>, transcript_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            transcript_id: transcript_id.into(),
        }
    }
}

/// Read access to transcripts and the people rows around them.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Look up a transcript by public UUID.
    async fn transcript_by_uuid(&self, uuid: &str) -> Result<Option<TranscriptRecord>>;

    /// Look up a patient by row ID.
    async fn patient_by_id(&self, id: i64) -> Result<Option<PatientRecord>>;

    /// Look up a therapist by row ID.
    async fn therapist_by_id(&self, id: i64) -> Result<Option<TherapistRecord>>;

    /// Look up a therapist by public UUID.
    async fn therapist_by_uuid(&self, uuid: &str) -> Result<Option<TherapistRecord>>;
}

/// Bounded per-conversation question/answer memory.
#[async_trait]
pub trait ConversationMemory: Send + Sync {
    /// Fetch the retained history for `key`, oldest first. Unknown keys
    /// yield an empty history.
    async fn history(&self, key: &MemoryKey, max_pairs: u32) -> Result<Vec<MemoryEntry>>;

    /// Append a question/answer pair and trim to the newest `max_pairs`
    /// pairs, atomically.
    async fn append(
        &self,
        key: &MemoryKey,
        question: &str,
        answer: &str,
        max_pairs: u32,
    ) -> Result<()>;
}

/// Append-only audit log of answered questions.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append one audit record.
    async fn append(&self, record: &AuditRecord) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_key_equality() {
        let a = MemoryKey::new("u-1", "t-1");
        let b = MemoryKey::new("u-1", "t-1");
        assert_eq!(a, b);
        assert_ne!(a, MemoryKey::new("u-2", "t-1"));
        assert_ne!(a, MemoryKey::new("u-1", "t-2"));
    }
}
