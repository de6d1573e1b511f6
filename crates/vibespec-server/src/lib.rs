pub mod config;
mod routes;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

use anyhow::Result;
use tokio::net::TcpListener;

use config::ServerConfig;

pub async fn serve(listener: TcpListener, config: ServerConfig) -> Result<()> {
    let app = routes::build_router(routes::app_state(config));
    axum::serve(listener, app).await?;
    Ok(())
}
