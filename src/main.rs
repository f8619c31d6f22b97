//! Student Advisor Server
//!
//! Loads the trained model once, then serves predictions over HTTP.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use student_advisor::{config, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging: JSON lines in production, human-readable otherwise
    let (json_layer, text_layer) = if config.is_production() {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "student_advisor=debug,tower_http=debug".into()))
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::info!("Student Advisor starting ({})...", config.environment);
    if !config.is_production() {
        tracing::debug!("Configuration: {:?}", config);
    }

    // Model must load before the server accepts requests
    let state = AppState::load(config.clone()).with_context(|| {
        format!("Failed to load model from {}", config.model_path.display())
    })?;

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
