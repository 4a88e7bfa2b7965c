//! `kraken-mcp`: serves the Kraken tools to an MCP host over stdio.

use std::process::ExitCode;
use std::sync::Arc;

use kraken_mcp_tools::auth::Credentials;
use kraken_mcp_tools::config::ServerConfig;
use kraken_mcp_tools::server;
use kraken_mcp_tools::tools::ToolRegistry;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // stdout carries protocol frames, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Arc::new(Credentials::from_env()?);
    let config = ServerConfig::from_env()?;
    let registry = ToolRegistry::new(config.rest_client(credentials)?)?;

    info!(
        base_url = %config.base_url,
        tools = registry.len(),
        "serving Kraken tools on stdio"
    );
    server::serve_stdio(Arc::new(registry)).await?;
    info!("shutdown complete");
    Ok(())
}
