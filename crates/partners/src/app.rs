// Router assembly
// Decision: One reqwest client with a bounded timeout shared by Discord and the webhook relay
// Decision: CORS is opt-in; same-origin deployments need none

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::auth::{self, AuthState};
use crate::config::AppConfig;
use crate::openapi::ApiDoc;
use crate::partners::{self, PartnersState, WebhookRelay};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the outbound HTTP client
pub fn http_client(config: &AppConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.http_timeout)
        .user_agent(concat!("bloxion-partners/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Build the complete application router
pub fn build_router(config: &AppConfig) -> Result<Router> {
    let client = http_client(config)?;

    let auth_state = AuthState::new(config.auth.clone(), client.clone())
        .context("Failed to initialize session tokens")?;

    let relay = config
        .webhook_url
        .as_ref()
        .map(|url| Arc::new(WebhookRelay::new(url.clone(), client.clone())));

    let partners_state = PartnersState {
        auth: auth_state.clone(),
        relay,
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/api-doc/openapi.json", get(openapi_json))
        .merge(auth::routes(auth_state))
        .merge(partners::routes(partners_state));

    let app = match cors_layer(&config.cors_allowed_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    };

    Ok(app.layer(TraceLayer::new_for_http()))
}

/// CORS layer for credentialed cross-origin requests, if any origin is configured
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
            .allow_credentials(true),
    )
}
