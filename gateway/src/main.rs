mod api;
mod error;
mod routes;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::routes::{router, AppState};
use outing_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging Setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    info!("Outing Gateway Initializing...");

    // 2. Configuration (credentials are read once, here)
    let config = Config::from_env()?;

    // 3. Upstream clients
    let state = AppState::new(&config)?;

    // 4. Routes
    let app = router(state);

    // 5. Start Server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Backend running at http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
