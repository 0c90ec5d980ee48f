//! HTTP server for the parental leave planner.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use parental_leave_planner::api::{AppState, create_router};
use parental_leave_planner::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "parental-leave-planner",
    about = "Plans Swedish parental leave and serves the planner API"
)]
struct Cli {
    /// Directory holding scheme.yaml, benefits.yaml and days.yaml.
    #[arg(short, long, default_value = "./config/sweden")]
    config: PathBuf,
    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    info!(
        scheme = %config.scheme().name,
        version = %config.scheme().version,
        families = config.families().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(cli.addr)
        .await
        .with_context(|| format!("binding {}", cli.addr))?;
    info!("Listening on {}", cli.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
