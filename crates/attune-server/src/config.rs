//! Server configuration.
//!
//! Everything has a default except the API key; `ATTUNE_*` environment
//! variables override, and CLI flags override those.

use std::env;

use anyhow::{Context, Result};
use attune_runtime::{AgentConfig, FanoutConfig};
use std::time::Duration;

/// Configuration for the attune server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `3000`).
    pub port: u16,
    /// `SQLite` database path (default `"attune.db"`).
    pub database_path: String,
    /// OpenAI API key, from `OPENAI_API_KEY`.
    pub openai_api_key: String,
    /// Chat model (default `"gpt-4-turbo"`).
    pub model: String,
    /// Override for the OpenAI-compatible base URL.
    pub openai_base_url: Option<String>,
    /// Token estimate at or above which transcripts are summarized
    /// (default `10000`).
    pub max_summary_tokens: u32,
    /// Conversation memory retention in Q&A pairs (default `6`).
    pub history_pairs: u32,
    /// Summarization calls in flight at once (default `4`).
    pub summary_concurrency: usize,
    /// Per-summarization-call timeout in seconds (default `30`).
    pub summary_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails if `OPENAI_API_KEY` is unset or a numeric override is
    /// unparseable.
    pub fn from_env() -> Result<Self> {
        let openai_api_key =
            env::var("OPENAI_API_KEY").context("missing environment variable: OPENAI_API_KEY")?;

        Ok(Self {
            host: env_or("ATTUNE_HOST", "127.0.0.1"),
            port: env_parsed("ATTUNE_PORT", 3000)?,
            database_path: env_or("ATTUNE_DATABASE_PATH", "attune.db"),
            openai_api_key,
            model: env_or("ATTUNE_MODEL", "gpt-4-turbo"),
            openai_base_url: env::var("ATTUNE_OPENAI_BASE_URL").ok(),
            max_summary_tokens: env_parsed("ATTUNE_MAX_SUMMARY_TOKENS", 10_000)?,
            history_pairs: env_parsed("ATTUNE_HISTORY_PAIRS", 6)?,
            summary_concurrency: env_parsed("ATTUNE_SUMMARY_CONCURRENCY", 4)?,
            summary_timeout_secs: env_parsed("ATTUNE_SUMMARY_TIMEOUT_SECS", 30)?,
        })
    }

    /// Derive the pipeline configuration.
    #[must_use]
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            max_summary_tokens: self.max_summary_tokens,
            history_pairs: self.history_pairs,
            fanout: FanoutConfig {
                concurrency: self.summary_concurrency,
                timeout: Duration::from_secs(self.summary_timeout_secs),
            },
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw.parse().with_context(|| format!("invalid {name}: {raw}")),
        Err(_) => Ok(default),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
