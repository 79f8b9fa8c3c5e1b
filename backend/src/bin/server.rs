//! Bar finder HTTP server binary.
//!
//! Loads configuration, builds the repository, and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! # Empty in-memory repository
//! cargo run --bin barfinder-server
//!
//! # Seeded from a JSON file
//! SEED_DATA=backend/data/sample_venues.json cargo run --bin barfinder-server
//! ```
//!
//! # Environment Variables
//!
//! - `BARFINDER_CONFIG`: Path to a TOML configuration file
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Repository backend (default: local)
//! - `SEED_DATA`: JSON seed file for the local repository
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use barfinder::config::AppConfig;
use barfinder::db::RepositoryFactory;
use barfinder::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting bar finder HTTP server");

    let repository = RepositoryFactory::from_settings(&config.repository)?;
    info!(repository = %config.repository.repo_type, "Repository initialized successfully");

    let state = AppState::new(repository, config.search.clone());
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
