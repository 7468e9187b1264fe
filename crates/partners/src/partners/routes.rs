// Partner application HTTP routes
// Decision: Check order is method, session, body, configuration, relay
// Decision: Body is parsed by hand so malformed JSON still yields a JSON 400 after auth
// Decision: Body rejections (oversized, unreadable) go through ApiError so they stay JSON

use axum::{
    body::Bytes,
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use std::sync::Arc;

use super::{
    application::SubmitApplicationRequest,
    webhook::{application_message, WebhookRelay},
};
use crate::api::SuccessResponse;
use crate::auth::{AuthState, AuthUser};
use crate::error::{method_not_allowed, ApiError};

/// App state for partners routes
#[derive(Clone)]
pub struct PartnersState {
    pub auth: AuthState,
    /// None when WEBHOOK_URL is not configured
    pub relay: Option<Arc<WebhookRelay>>,
}

impl FromRef<PartnersState> for AuthState {
    fn from_ref(input: &PartnersState) -> Self {
        input.auth.clone()
    }
}

/// Create partners routes
pub fn routes(state: PartnersState) -> Router {
    Router::new()
        .route(
            "/api/partners/submit",
            post(submit_application).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// POST /api/partners/submit - Relay a partner application to Discord
#[utoipa::path(
    post,
    path = "/api/partners/submit",
    request_body = super::application::SubmitApplicationRequest,
    responses(
        (status = 200, description = "Application relayed", body = SuccessResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::api::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::api::ErrorResponse),
        (status = 405, description = "Method not allowed", body = crate::api::ErrorResponse),
        (status = 500, description = "Relay or configuration failure", body = crate::api::ErrorResponse)
    ),
    tag = "partners"
)]
pub async fn submit_application(
    State(state): State<PartnersState>,
    user: AuthUser,
    WithRejection(body, _): WithRejection<Bytes, ApiError>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let request: SubmitApplicationRequest = if body.iter().all(u8::is_ascii_whitespace) {
        SubmitApplicationRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Rejected partner application body: {}", e);
            ApiError::input("Invalid JSON body")
        })?
    };

    let application = request.validate()?;

    let relay = state.relay.as_ref().ok_or_else(|| {
        tracing::error!("Partner application received but WEBHOOK_URL is not configured");
        ApiError::configuration("Webhook URL not configured")
    })?;

    let message = application_message(&user.claims, &application, Utc::now());
    relay.send(&message).await.map_err(|e| {
        tracing::error!("Webhook error: {}", e);
        ApiError::upstream("Failed to send webhook")
    })?;

    tracing::info!(
        user_id = %user.claims.id,
        group = %application.group,
        "Partner application relayed"
    );

    Ok(Json(SuccessResponse::ok()))
}
