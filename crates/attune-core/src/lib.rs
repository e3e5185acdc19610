//! # attune-core
//!
//! Foundation types and pure transcript utilities for the attune agent.
//!
//! This crate provides the shared vocabulary the other attune crates depend on:
//!
//! - **Errors**: [`errors::AgentError`] taxonomy via `thiserror`
//! - **Records**: [`records::TranscriptRecord`], [`records::PatientRecord`],
//!   [`records::SessionMetadata`], [`records::MemoryEntry`],
//!   [`records::AuditRecord`]
//! - **Text**: [`text::sanitize_transcript`] and session-date formatting
//! - **Tokens**: [`tokens::estimate_tokens`] chars/4 approximation
//! - **Chunking**: [`chunk::chunk_transcript`] topic-aligned splitting
//!
//! ## Crate Position
//!
//! Foundation crate. No I/O, no async — everything here is a pure function
//! or a plain data type. Depended on by all other attune crates.

#![deny(unsafe_code)]

pub mod chunk;
pub mod errors;
pub mod records;
pub mod text;
pub mod tokens;
