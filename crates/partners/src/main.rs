// Bloxion Partners API server
// Decision: Configuration comes from the environment (.env honored for local development)

use anyhow::{Context, Result};
use bloxion_partners::{app, AppConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloxion_partners=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("bloxion-partners starting...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        oauth = config.auth.oauth_enabled(),
        webhook = config.webhook_url.is_some(),
        session_lifetime_secs = config.auth.jwt.session_lifetime.as_secs(),
        "Configuration loaded"
    );

    if config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_allowed_origins, "CORS origins configured");
    }

    let app = app::build_router(&config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
