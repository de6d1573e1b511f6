use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vibespec_server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    if config.credential().is_none() {
        warn!("OPENAI_API_KEY is not set; /api/chat will answer 500");
    }

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;
    info!("vibespec relay listening on {addr}, forwarding to {}", config.upstream_url);
    vibespec_server::serve(listener, config).await
}
