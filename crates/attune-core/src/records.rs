//! Record types shared across the attune crates.
//!
//! - [`TranscriptRecord`] / [`PatientRecord`] / [`TherapistRecord`]: rows
//!   resolved from the relational store
//! - [`SessionMetadata`]: per-request metadata block, derived once per question
//! - [`MemoryEntry`]: one turn of keyed conversation history
//! - [`AuditRecord`]: the append-only per-answer audit artifact

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Store records
// ─────────────────────────────────────────────────────────────────────────────

/// A stored session transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    /// Row ID.
    pub id: i64,
    /// Stable public identifier.
    pub transcript_uuid: String,
    /// Owning patient row ID.
    pub patient_id: i64,
    /// Raw transcript text with speaker tags.
    pub content: String,
    /// Session timestamp.
    pub created_at: DateTime<Utc>,
}

/// A patient row, linked to the therapist who owns the records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Row ID.
    pub id: i64,
    /// Stable public identifier.
    pub patient_uuid: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Owning therapist (user) row ID.
    pub therapist_id: i64,
    /// Contact email.
    pub email: String,
    /// When the patient row was created.
    pub created_at: DateTime<Utc>,
    /// Date of the patient's first session.
    pub first_session_date: DateTime<Utc>,
}

impl PatientRecord {
    /// Display name in `"First Last"` form.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A therapist (user) row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TherapistRecord {
    /// Row ID.
    pub id: i64,
    /// Stable public identifier. API callers identify themselves with this.
    pub therapist_uuid: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Session metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Per-request session metadata, derived once per question and never cached
/// across requests.
///
/// Field order is load-bearing: the context assembler renders the metadata
/// block as `key: value` lines in declared order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Patient display name.
    pub patient_name: String,
    /// Patient email.
    pub patient_email: String,
    /// Formatted date of the patient's first session.
    pub patient_first_session_date: String,
    /// Formatted date of the transcribed session.
    pub session_date: String,
    /// Therapist display name.
    pub therapist_name: String,
}

impl SessionMetadata {
    /// Fields as `(key, value)` pairs in declared order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("patient_name", self.patient_name.as_str()),
            ("patient_email", self.patient_email.as_str()),
            (
                "patient_first_session_date",
                self.patient_first_session_date.as_str(),
            ),
            ("session_date", self.session_date.as_str()),
            ("therapist_name", self.therapist_name.as_str()),
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversation memory
// ─────────────────────────────────────────────────────────────────────────────

/// Who produced a memory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryRole {
    /// The questioning user (therapist).
    Asker,
    /// The answering agent.
    Responder,
}

impl MemoryRole {
    /// Stable wire/storage name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asker => "asker",
            Self::Responder => "responder",
        }
    }

    /// Parse from the storage name.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asker" => Some(Self::Asker),
            "responder" => Some(Self::Responder),
            _ => None,
        }
    }
}

/// One entry of keyed question/answer history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Who said it.
    pub role: MemoryRole,
    /// What was said.
    pub text: String,
}

impl MemoryEntry {
    /// Create an asker-role entry.
    #[must_use]
    pub fn asker(text: impl Into<String>) -> Self {
        Self {
            role: MemoryRole::Asker,
            text: text.into(),
        }
    }

    /// Create a responder-role entry.
    #[must_use]
    pub fn responder(text: impl Into<String>) -> Self {
        Self {
            role: MemoryRole::Responder,
            text: text.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Audit record
// ─────────────────────────────────────────────────────────────────────────────

/// Append-only audit record, created once per answered question.
///
/// Never mutated or deleted by this system; retention is the store's concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Transcript the question was about.
    pub transcript_id: i64,
    /// The question as submitted.
    pub question: String,
    /// The answer as returned.
    pub answer: String,
    /// Model identifier used for the answer.
    pub model_used: String,
    /// JSON snapshot of the structured context object sent to the model.
    pub prompt_snapshot: String,
    /// When the answer was produced.
    pub created_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn patient() -> PatientRecord {
        PatientRecord {
            id: 1,
            patient_uuid: "p-uuid".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            therapist_id: 9,
            email: "ada@example.com".into(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            first_session_date: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn patient_display_name() {
        assert_eq!(patient().display_name(), "Ada Lovelace");
    }

    #[test]
    fn metadata_fields_in_declared_order() {
        let meta = SessionMetadata {
            patient_name: "Ada Lovelace".into(),
            patient_email: "ada@example.com".into(),
            patient_first_session_date: "May 01, 2025 at 9am".into(),
            session_date: "June 01, 2025 at 12am".into(),
            therapist_name: "Dr. Byron".into(),
        };
        let keys: Vec<&str> = meta.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "patient_name",
                "patient_email",
                "patient_first_session_date",
                "session_date",
                "therapist_name",
            ]
        );
    }

    #[test]
    fn memory_role_round_trips_storage_name() {
        for role in [MemoryRole::Asker, MemoryRole::Responder] {
            assert_eq!(MemoryRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(MemoryRole::from_str("user"), None);
    }

    #[test]
    fn memory_entry_constructors() {
        assert_eq!(MemoryEntry::asker("q").role, MemoryRole::Asker);
        assert_eq!(MemoryEntry::responder("a").role, MemoryRole::Responder);
    }

    #[test]
    fn memory_role_serde_is_snake_case() {
        let json = serde_json::to_string(&MemoryRole::Asker).unwrap();
        assert_eq!(json, r#""asker""#);
    }

    #[test]
    fn audit_record_serde_roundtrip() {
        let record = AuditRecord {
            transcript_id: 3,
            question: "What was discussed?".into(),
            answer: "Sleep trouble.".into(),
            model_used: "gpt-4-turbo".into(),
            prompt_snapshot: "{}".into(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 10, 4, 45, 54).unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: AuditRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
