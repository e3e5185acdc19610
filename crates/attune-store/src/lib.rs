//! # attune-store
//!
//! `SQLite` persistence for the attune agent: transcript/patient/therapist
//! lookups, bounded per-conversation memory, and the append-only QA audit
//! log. Pooled connections via `r2d2` with WAL mode and foreign keys on.

#![deny(unsafe_code)]

pub mod audit;
pub mod connection;
pub mod errors;
pub mod memory;
pub mod migrations;
pub mod transcripts;

pub use audit::AuditRepo;
pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory};
pub use errors::{Result, StoreError};
pub use memory::MemoryRepo;
pub use migrations::run_migrations;
pub use transcripts::{NewPatient, PatientRepo, TherapistRepo, TranscriptRepo};
