use tracing_subscriber::EnvFilter;

use assessa_server::config::ServerConfig;
use assessa_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(bind = %config.bind, backend = %config.backend_url, "assessa-server listening");

    axum::serve(listener, assessa_server::app(state)).await?;
    Ok(())
}
