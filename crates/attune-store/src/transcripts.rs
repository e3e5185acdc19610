//! Repositories for therapists, patients, and transcripts.
//!
//! Stateless repos: associated functions over a borrowed [`Connection`],
//! so callers control pooling and transactions.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use attune_core::records::{PatientRecord, TherapistRecord, TranscriptRecord};

use crate::errors::{Result, StoreError};

/// Parse an RFC 3339 timestamp column.
pub(crate) fn parse_datetime(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::CorruptRow {
            message: format!("bad timestamp {raw:?}: {e}"),
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Therapists
// ─────────────────────────────────────────────────────────────────────────────

/// Repository for therapist rows.
pub struct TherapistRepo;

impl TherapistRepo {
    /// Insert a therapist, returning the row ID.
    pub fn insert(conn: &Connection, uuid: &str, name: &str, email: &str) -> Result<i64> {
        let _ = conn.execute(
            "INSERT INTO therapists (therapist_uuid, name, email, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![uuid, name, email, Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Look up a therapist by row ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<TherapistRecord>> {
        conn.query_row(
            "SELECT id, therapist_uuid, name, email FROM therapists WHERE id = ?1",
            params![id],
            Self::map_row,
        )
        .optional()
        .map_err(StoreError::Sqlite)
    }

    /// Look up a therapist by public UUID.
    pub fn find_by_uuid(conn: &Connection, uuid: &str) -> Result<Option<TherapistRecord>> {
        conn.query_row(
            "SELECT id, therapist_uuid, name, email FROM therapists WHERE therapist_uuid = ?1",
            params![uuid],
            Self::map_row,
        )
        .optional()
        .map_err(StoreError::Sqlite)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TherapistRecord> {
        Ok(TherapistRecord {
            id: row.get(0)?,
            therapist_uuid: row.get(1)?,
            name: row.get(2)?,
            email: row.get(3)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Patients
// ─────────────────────────────────────────────────────────────────────────────

/// Repository for patient rows.
pub struct PatientRepo;

/// Parameters for inserting a patient.
pub struct NewPatient<'a> {
    /// Stable public identifier.
    pub patient_uuid: &'a str,
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Owning therapist row ID.
    pub therapist_id: i64,
    /// Contact email.
    pub email: &'a str,
    /// Date of the patient's first session.
    pub first_session_date: DateTime<Utc>,
}

impl PatientRepo {
    /// Insert a patient, returning the row ID.
    pub fn insert(conn: &Connection, new: &NewPatient<'_>) -> Result<i64> {
        let _ = conn.execute(
            "INSERT INTO patients
               (patient_uuid, first_name, last_name, therapist_id, email, created_at, first_session_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new.patient_uuid,
                new.first_name,
                new.last_name,
                new.therapist_id,
                new.email,
                Utc::now().to_rfc3339(),
                new.first_session_date.to_rfc3339(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Look up a patient by row ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<PatientRecord>> {
        let row = conn
            .query_row(
                "SELECT id, patient_uuid, first_name, last_name, therapist_id, email,
                        created_at, first_session_date
                 FROM patients WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, String>(7)?,
                    ))
                },
            )
            .optional()?;

        row.map(
            |(id, patient_uuid, first_name, last_name, therapist_id, email, created, first)| {
                Ok(PatientRecord {
                    id,
                    patient_uuid,
                    first_name,
                    last_name,
                    therapist_id,
                    email,
                    created_at: parse_datetime(&created)?,
                    first_session_date: parse_datetime(&first)?,
                })
            },
        )
        .transpose()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transcripts
// ─────────────────────────────────────────────────────────────────────────────

/// Repository for transcript rows.
pub struct TranscriptRepo;

impl TranscriptRepo {
    /// Insert a transcript, returning the row ID.
    pub fn insert(
        conn: &Connection,
        uuid: &str,
        patient_id: i64,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let _ = conn.execute(
            "INSERT INTO transcripts (transcript_uuid, patient_id, content, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![uuid, patient_id, content, created_at.to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Look up a transcript by public UUID.
    pub fn find_by_uuid(conn: &Connection, uuid: &str) -> Result<Option<TranscriptRecord>> {
        let row = conn
            .query_row(
                "SELECT id, transcript_uuid, patient_id, content, created_at
                 FROM transcripts WHERE transcript_uuid = ?1",
                params![uuid],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, transcript_uuid, patient_id, content, created)| {
            Ok(TranscriptRecord {
                id,
                transcript_uuid,
                patient_id,
                content,
                created_at: parse_datetime(&created)?,
            })
        })
        .transpose()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
