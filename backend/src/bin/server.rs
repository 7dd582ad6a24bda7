//! Stay HTTP Server Binary
//!
//! Main entry point for the availability and booking-request API.
//! It loads configuration, initializes the repository and the availability
//! feed, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with an empty in-memory repository
//! cargo run --bin stay-server
//!
//! # Seed bookings and enable the admin panel
//! SEED_FILE=seed/bookings.json ADMIN_TOKEN=secret cargo run --bin stay-server
//! ```
//!
//! # Environment Variables
//!
//! - `STAY_CONFIG`: Path to a `stay.toml` (default: searched in standard locations)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `ADMIN_TOKEN`: Bearer token for `/v1/admin` routes
//! - `CONTACT_PHONE`: WhatsApp number receiving booking requests
//! - `SITE_UTC_OFFSET`: Offset for reading stored dates (default: -03:00)
//! - `SEED_FILE`: JSON array of booking records to load at startup
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use stay_rust::config::AppConfig;
use stay_rust::db::RepositoryFactory;
use stay_rust::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Stay HTTP Server");

    let config = AppConfig::load().context("Failed to load configuration")?;
    if config.admin.token.is_none() {
        warn!("ADMIN_TOKEN not set; admin routes will refuse every request");
    }
    if config.site.contact_phone.is_none() {
        warn!("CONTACT_PHONE not set; booking requests will fail");
    }

    let repository = RepositoryFactory::from_settings(&config.repository)
        .context("Failed to initialize repository")?;
    info!("Repository initialized successfully");

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("Invalid bind address")?;

    // Create application state and publish the first availability snapshot
    let state = AppState::from_config(repository, config);
    if let Err(e) = state.feed.refresh(state.repository.as_ref()).await {
        warn!("Starting with empty availability: {}", e);
    }

    // Create router with all endpoints
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
