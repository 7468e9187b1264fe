// Authentication HTTP routes
// Decision: Paths stay under /api/auth/* to match the existing partners frontend
// Decision: OAuth state is checked only when the login endpoint set it (direct callbacks still work)

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    cookie,
    discord::generate_oauth_state,
    middleware::{AuthState, AuthUser},
};
use crate::api::SuccessResponse;
use crate::error::{method_not_allowed, ApiError};

/// OAuth callback query parameters
#[derive(Debug, Default, Deserialize)]
pub struct DiscordCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by Discord when the user denies authorization
    pub error: Option<String>,
}

/// Session introspection response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUserResponse {
    pub id: String,
    pub username: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    /// `username#discriminator`, or the username alone for accounts without a discriminator
    pub tag: String,
}

impl From<AuthUser> for SessionUserResponse {
    fn from(user: AuthUser) -> Self {
        let tag = user.claims.tag();
        Self {
            id: user.claims.id,
            username: user.claims.username,
            discriminator: user.claims.discriminator,
            avatar: user.claims.avatar,
            tag,
        }
    }
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route(
            "/api/auth/discord/login",
            get(discord_login).fallback(method_not_allowed),
        )
        .route(
            "/api/auth/discord/callback",
            get(discord_callback).fallback(method_not_allowed),
        )
        .route(
            "/api/auth/me",
            get(current_user).fallback(method_not_allowed),
        )
        .route(
            "/api/auth/logout",
            post(logout).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// GET /api/auth/discord/login - Redirect to Discord authorization
#[utoipa::path(
    get,
    path = "/api/auth/discord/login",
    responses(
        (status = 303, description = "Redirect to Discord authorization page"),
        (status = 500, description = "Discord OAuth not configured", body = crate::api::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn discord_login(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let discord = state.discord.as_ref().ok_or_else(|| {
        tracing::error!("Discord login requested but OAuth is not configured");
        ApiError::configuration("OAuth not configured")
    })?;

    let oauth_state = generate_oauth_state();
    let url = discord.authorization_url(&oauth_state).map_err(|e| {
        tracing::error!("Failed to build Discord authorization URL: {}", e);
        ApiError::configuration("OAuth not configured")
    })?;

    Ok((jar.add(cookie::oauth_state_cookie(oauth_state)), Redirect::to(&url)))
}

/// GET /api/auth/discord/callback - Exchange code, issue session cookie
#[utoipa::path(
    get,
    path = "/api/auth/discord/callback",
    params(
        ("code" = String, Query, description = "OAuth authorization code"),
        ("state" = Option<String>, Query, description = "OAuth state echoed by Discord")
    ),
    responses(
        (status = 303, description = "Session cookie set, redirect to partners page"),
        (status = 400, description = "Missing or invalid code", body = crate::api::ErrorResponse),
        (status = 500, description = "Code exchange failed", body = crate::api::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn discord_callback(
    State(state): State<AuthState>,
    jar: CookieJar,
    WithRejection(Query(query), _): WithRejection<Query<DiscordCallbackQuery>, ApiError>,
) -> Result<(CookieJar, Redirect), ApiError> {
    if let Some(error) = query.error {
        tracing::warn!("Discord authorization denied: {}", error);
        return Err(ApiError::input("OAuth authorization denied"));
    }

    let code = query
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::input("Missing OAuth code"))?;

    if let Some(expected) = cookie::extract_oauth_state(&jar) {
        if query.state.as_deref() != Some(expected.as_str()) {
            tracing::warn!("OAuth state mismatch on Discord callback");
            return Err(ApiError::input("Invalid OAuth state"));
        }
    }

    let discord = state.discord.as_ref().ok_or_else(|| {
        tracing::error!("Discord callback received but OAuth is not configured");
        ApiError::configuration("OAuth not configured")
    })?;

    let user = discord.exchange_code(&code).await.map_err(|e| {
        tracing::error!("Discord OAuth exchange failed: {}", e);
        ApiError::from(e)
    })?;

    let token = state.tokens.issue(&user).map_err(|e| {
        tracing::error!("Session token issuance failed: {}", e);
        ApiError::upstream("OAuth callback failed")
    })?;

    tracing::info!(user_id = %user.id, "Discord login completed");

    let jar = cookie::attach(
        cookie::clear_oauth_state(jar),
        token,
        state.tokens.lifetime_secs(),
    );

    Ok((jar, Redirect::to(&state.config.post_login_redirect)))
}

/// GET /api/auth/me - Current session user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = SessionUserResponse),
        (status = 401, description = "Not authenticated", body = crate::api::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn current_user(user: AuthUser) -> Json<SessionUserResponse> {
    Json(user.into())
}

/// POST /api/auth/logout - Clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse)
    ),
    tag = "auth"
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    (cookie::clear(jar), Json(SuccessResponse::ok()))
}
