//! # packstack-api: Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `PORT` (default 8080).

use packstack_api::source::PackSource;
use packstack_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let source = match &config.data_dir {
        Some(dir) => {
            tracing::info!(data_dir = %dir.display(), "serving packs from directory");
            PackSource::Directory(dir.clone())
        }
        None => {
            let api_config = packstack_client::PackApiConfig::from_env().map_err(|e| {
                tracing::error!("invalid pack API configuration: {e}");
                e
            })?;
            tracing::info!(base_url = %api_config.base_url, "serving packs from pack API");
            PackSource::Remote(packstack_client::PackClient::new(api_config)?)
        }
    };

    let port = config.port;
    let state = AppState::new(&config, source);
    let app = packstack_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("packstack API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
