mod config;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use daybook_core::{MemStorage, Storage};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "daybook-server")]
#[command(about = "Serve the daybook calendar API")]
struct Cli {
    /// Config file (defaults to <config dir>/daybook/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Start with an empty store instead of sample events
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.no_seed {
        config.seed_sample_events = false;
    }

    init_tracing(&config.log_filter);

    let storage = if config.seed_sample_events {
        MemStorage::with_sample_events(Local::now().date_naive())
    } else {
        MemStorage::new()
    };
    tracing::info!(events = storage.event_count(), "Event store ready");

    let app = routes::app(AppState::new(Arc::new(storage)));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("daybook-server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("daybook-server stopped");
    Ok(())
}

/// RUST_LOG takes precedence over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, run until killed
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
