//! noteful API server
//!
//! Serves folder and note CRUD over HTTP from a SQLite database.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;

use noteful::{build_router, logging, AppState, Config, Environment, SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "noteful")]
#[command(about = "REST API for folders and notes")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 8000, env = "NOTEFUL_PORT")]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1", env = "NOTEFUL_BIND")]
    bind: String,

    /// Connection string for the database
    #[arg(long, default_value = "sqlite://noteful.db", env = "DATABASE_URL")]
    database_url: String,

    /// Runtime mode; production turns off error diagnostics
    #[arg(long, value_enum, default_value_t = Environment::Development, env = "NOTEFUL_ENV")]
    env: Environment,

    /// Path to an optional JSON config file
    #[arg(long, env = "NOTEFUL_CONFIG")]
    config: Option<PathBuf>,

    /// Also append JSON logs to this file
    #[arg(long, env = "NOTEFUL_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.env, cli.log_file.as_deref())?;

    let config = Config::load(cli.config.as_deref())?;
    let store = SqliteStore::connect(&cli.database_url, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database: {}", cli.database_url))?;

    let state = Arc::new(AppState::new(
        Arc::new(store.clone()),
        config,
        cli.env,
    ));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;

    tracing::info!("Starting noteful on {} ({} mode)", addr, cli.env);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("noteful shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
