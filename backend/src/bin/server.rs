//! Space Weather HTTP Server Binary
//!
//! Loads configuration, builds the catalog and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin space-weather-server
//!
//! # With an explicit configuration file
//! SPACE_WEATHER_CONFIG=./space-weather.toml cargo run --bin space-weather-server
//! ```
//!
//! # Environment Variables
//!
//! - `SPACE_WEATHER_CONFIG`: Configuration file (default: `space-weather.toml` if present)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter (default: info)

use tracing::info;
use tracing_subscriber::EnvFilter;

use space_weather::config::ServerConfig;
use space_weather::db;
use space_weather::http::{create_router_with_body_limit, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Space Weather HTTP Server");

    let config = ServerConfig::load()?;
    let repository = db::create_repository(config.catalog.seed);
    let state = AppState::new(repository);

    let app = create_router_with_body_limit(state, config.server.body_limit_bytes);

    let addr = config.bind_address()?;
    info!("Server listening on http://{}", addr);
    info!("Planets: http://{}/api/v1/planets", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
