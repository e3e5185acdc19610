//! Bounded conversation memory.
//!
//! One memory per (user UUID, transcript UUID) key. Appending a
//! question/answer pair and trimming to the retention window happen in a
//! single transaction, so a crash between the two can never leave an
//! odd-length or over-long history behind.

use chrono::Utc;
use rusqlite::{Connection, params};
use tracing::debug;

use attune_core::records::{MemoryEntry, MemoryRole};

use crate::errors::{Result, StoreError};

/// Repository for the `conversation_memory` table.
pub struct MemoryRepo;

impl MemoryRepo {
    /// Append a question/answer pair and trim the history to the newest
    /// `max_pairs` pairs, atomically.
    pub fn append_pair(
        conn: &Connection,
        user_uuid: &str,
        transcript_uuid: &str,
        question: &str,
        answer: &str,
        max_pairs: u32,
    ) -> Result<()> {
        let tx = conn.unchecked_transaction()?;
        let now = Utc::now().to_rfc3339();

        let _ = tx.execute(
            "INSERT INTO conversation_memory (user_uuid, transcript_uuid, role, text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_uuid,
                transcript_uuid,
                MemoryRole::Asker.as_str(),
                question,
                now
            ],
        )?;
        let _ = tx.execute(
            "INSERT INTO conversation_memory (user_uuid, transcript_uuid, role, text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_uuid,
                transcript_uuid,
                MemoryRole::Responder.as_str(),
                answer,
                now
            ],
        )?;

        // Keep only the newest 2 * max_pairs entries for this key.
        let _ = tx.execute(
            "DELETE FROM conversation_memory
             WHERE user_uuid = ?1 AND transcript_uuid = ?2
               AND id NOT IN (
                 SELECT id FROM conversation_memory
                 WHERE user_uuid = ?1 AND transcript_uuid = ?2
                 ORDER BY id DESC
                 LIMIT ?3
               )",
            params![user_uuid, transcript_uuid, max_pairs * 2],
        )?;

        tx.commit()?;
        debug!(user_uuid, transcript_uuid, "appended memory pair");
        Ok(())
    }

    /// Fetch the retained history for a key, oldest first.
    ///
    /// An unknown key yields an empty history, never an error.
    pub fn fetch(
        conn: &Connection,
        user_uuid: &str,
        transcript_uuid: &str,
        max_pairs: u32,
    ) -> Result<Vec<MemoryEntry>> {
        let mut stmt = conn.prepare(
            "SELECT role, text FROM (
               SELECT id, role, text FROM conversation_memory
               WHERE user_uuid = ?1 AND transcript_uuid = ?2
               ORDER BY id DESC
               LIMIT ?3
             ) ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![user_uuid, transcript_uuid, max_pairs * 2], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (role_raw, text) = row?;
            let role = MemoryRole::from_str(&role_raw).ok_or_else(|| StoreError::CorruptRow {
                message: format!("unknown memory role {role_raw:?}"),
            })?;
            entries.push(MemoryEntry { role, text });
        }
        Ok(entries)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
