//! starvnt-gateway server entry point.
//!
//! Loads configuration, wires the services and serves the HTTP API.

use tracing_subscriber::EnvFilter;

use starvnt_gateway::api;
use starvnt_gateway::app_state::AppState;
use starvnt_gateway::config::GatewayConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting starvnt-gateway");

    // Build service layer
    let app_state = AppState::from_config(&config)?;
    app_state.chat_service.spawn_session_sweeper();

    // Build router
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
