//! Ledger Lens dashboard server

use anyhow::{Context, Result};
use clap::Parser;
use ledger_core::{Config, FileConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ledger_web::{AppState, router};

const DEFAULT_LOG_FILTER: &str = "info,ledger_web=info,ledger_core=info";

#[derive(Parser, Debug)]
#[command(name = "ledger-web")]
#[command(about = "Transaction ledger dashboard with AI financial health reports")]
struct Args {
    /// Config file (default: ledger.toml in the working directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Sample ledger shown in sample mode
    #[arg(long)]
    sample: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(sample) = self.sample {
            config.sample_path = sample;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let args = Args::parse();
    let file_config = FileConfig::discover(args.config.as_deref())?;
    let mut config = Config::from_file(file_config)?;
    args.apply(&mut config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    if config.report.api_key.resolve().is_none() {
        tracing::warn!(
            source = %config.report.api_key.describe(),
            "No API key configured; report generation will fail until one is set"
        );
    }

    let state = AppState::load(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
