use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use cinelist_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_redis_client, Cache},
    services::OmdbProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    let provider = OmdbProvider::new(
        cache,
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        config.cache_ttl_secs,
        Duration::from_secs(config.http_timeout_secs),
    )?;

    let state = AppState::new(Arc::new(provider));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, catalog = %config.omdb_api_url, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache_writer.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
