//! Append-only QA audit log.

use rusqlite::{Connection, params};
use tracing::debug;

use attune_core::records::AuditRecord;

use crate::errors::Result;

/// Repository for the `qa_logs` table.
///
/// Write-only from the application's point of view: rows are appended once
/// per answered question and never read back, updated, or deleted here.
pub struct AuditRepo;

impl AuditRepo {
    /// Append one audit record, returning the row ID.
    pub fn append(conn: &Connection, record: &AuditRecord) -> Result<i64> {
        let _ = conn.execute(
            "INSERT INTO qa_logs
               (transcript_id, question, answer, model_used, prompt_snapshot, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.transcript_id,
                record.question,
                record.answer,
                record.model_used,
                record.prompt_snapshot,
                record.created_at.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(transcript_id = record.transcript_id, id, "audit record appended");
        Ok(id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
