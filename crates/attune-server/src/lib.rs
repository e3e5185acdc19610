//! # attune-server
//!
//! Axum HTTP surface for the attune agent: the question endpoint, the
//! transcript view endpoint, and `/health`, plus the wiring that binds the
//! pipeline to its `SQLite` stores and the OpenAI-compatible provider.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod routes;
pub mod sqlite_stores;

pub use config::ServerConfig;
pub use routes::{AppState, build_router};
