//! attune-server binary.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use attune_llm::{ChatSummarizer, OpenAiConfig, OpenAiProvider};
use attune_runtime::AgentService;
use attune_server::config::ServerConfig;
use attune_server::logging::init_subscriber;
use attune_server::routes::{AppState, build_router};
use attune_server::sqlite_stores::SqliteStores;
use attune_store::{ConnectionConfig, new_file, run_migrations};

/// Transcript question-answering agent server.
#[derive(Parser, Debug)]
#[command(name = "attune-server", version, about)]
struct Cli {
    /// Host to bind.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind.
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database path.
    #[arg(long)]
    database: Option<String>,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_subscriber(&cli.log_level);

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let pool = new_file(&config.database_path, &ConnectionConfig::default())
        .context("failed to open database")?;
    {
        let conn = pool.get().context("failed to check out connection")?;
        let applied = run_migrations(&conn).context("failed to run migrations")?;
        info!(applied, db = %config.database_path, "database ready");
    }

    let client = reqwest::Client::new();
    let provider = OpenAiProvider::with_client(
        OpenAiConfig {
            api_key: config.openai_api_key.clone(),
            model: config.model.clone(),
            base_url: config.openai_base_url.clone(),
        },
        client.clone(),
    );
    let summarizer = ChatSummarizer::new(OpenAiProvider::with_client(
        OpenAiConfig {
            api_key: config.openai_api_key.clone(),
            model: config.model.clone(),
            base_url: config.openai_base_url.clone(),
        },
        client,
    ));

    let stores = Arc::new(SqliteStores::new(pool));
    let service = AgentService::new(
        stores.clone(),
        stores.clone(),
        stores,
        Arc::new(provider),
        Arc::new(summarizer),
        config.agent_config(),
    );

    let router = build_router(AppState {
        service: Arc::new(service),
        start_time: Instant::now(),
        model: config.model.clone(),
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, model = %config.model, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
