// API Server Binary Entry Point
//
// Purpose: serve the advisor session over HTTP/JSON.
// Usage: cargo run --features api --bin api_server

use std::net::SocketAddr;

use crop_predictor_rust::{create_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "crop_predictor_rust=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", data_dir);
    tracing::info!("  PORT: {}", port);

    // Initialize application state (loads reference tables)
    let state = AppState::new(&data_dir)?;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
