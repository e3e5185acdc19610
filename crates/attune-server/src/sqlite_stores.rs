//! `SQLite` implementations of the pipeline's storage traits.
//!
//! Each call checks out a pooled connection on a blocking thread via
//! [`tokio::task::spawn_blocking`] so `rusqlite` work never blocks the
//! async executor. Store errors collapse to [`AgentError::Internal`]; the
//! pipeline treats storage faults as unexpected.

use async_trait::async_trait;

use attune_core::errors::{AgentError, Result};
use attune_core::records::{
    AuditRecord, MemoryEntry, PatientRecord, TherapistRecord, TranscriptRecord,
};
use attune_runtime::{AuditStore, ConversationMemory, MemoryKey, TranscriptStore};
use attune_store::{AuditRepo, ConnectionPool, MemoryRepo, PatientRepo, TherapistRepo, TranscriptRepo};

/// All three storage traits over one connection pool.
#[derive(Clone)]
pub struct SqliteStores {
    pool: ConnectionPool,
}

impl SqliteStores {
    /// Wrap a pool.
    #[must_use]
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> attune_store::Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| AgentError::internal(format!("connection pool: {e}")))?;
            f(&conn).map_err(|e| AgentError::internal(e.to_string()))
        })
        .await
        .map_err(|e| AgentError::internal(format!("blocking task: {e}")))?
    }
}

#[async_trait]
impl TranscriptStore for SqliteStores {
    async fn transcript_by_uuid(&self, uuid: &str) -> Result<Option<TranscriptRecord>> {
        let uuid = uuid.to_owned();
        self.with_conn(move |conn| TranscriptRepo::find_by_uuid(conn, &uuid))
            .await
    }

    async fn patient_by_id(&self, id: i64) -> Result<Option<PatientRecord>> {
        self.with_conn(move |conn| PatientRepo::find_by_id(conn, id))
            .await
    }

    async fn therapist_by_id(&self, id: i64) -> Result<Option<TherapistRecord>> {
        self.with_conn(move |conn| TherapistRepo::find_by_id(conn, id))
            .await
    }

    async fn therapist_by_uuid(&self, uuid: &str) -> Result<Option<TherapistRecord>> {
        let uuid = uuid.to_owned();
        self.with_conn(move |conn| TherapistRepo::find_by_uuid(conn, &uuid))
            .await
    }
}

#[async_trait]
impl ConversationMemory for SqliteStores {
    async fn history(&self, key: &MemoryKey, max_pairs: u32) -> Result<Vec<MemoryEntry>> {
        let key = key.clone();
        self.with_conn(move |conn| {
            MemoryRepo::fetch(conn, &key.user_id, &key.transcript_id, max_pairs)
        })
        .await
    }

    async fn append(
        &self,
        key: &MemoryKey,
        question: &str,
        answer: &str,
        max_pairs: u32,
    ) -> Result<()> {
        let key = key.clone();
        let question = question.to_owned();
        let answer = answer.to_owned();
        self.with_conn(move |conn| {
            MemoryRepo::append_pair(
                conn,
                &key.user_id,
                &key.transcript_id,
                &question,
                &answer,
                max_pairs,
            )
        })
        .await
    }
}

#[async_trait]
impl AuditStore for SqliteStores {
    async fn append(&self, record: &AuditRecord) -> Result<()> {
        let record = record.clone();
        self.with_conn(move |conn| AuditRepo::append(conn, &record).map(|_| ()))
            .await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
