// Discord OAuth service
// Decision: Manual OAuth2 code exchange over the shared reqwest client (two calls, no SDK)
// Decision: A rejected code is a client error; transport and profile failures are upstream errors

use rand::Rng;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

use super::{config::DiscordOAuthConfig, jwt::IdentityClaims};
use crate::error::ApiError;

/// OAuth scope requested from Discord (profile only)
pub const DISCORD_SCOPE: &str = "identify";

/// Discord exchange failures
#[derive(Debug, Error)]
pub enum DiscordError {
    /// Discord rejected the authorization code or returned no access token
    #[error("authorization code rejected: {0}")]
    InvalidGrant(String),

    /// Transport failure, timeout, or unexpected response
    #[error("discord request failed: {0}")]
    Upstream(String),
}

impl From<DiscordError> for ApiError {
    fn from(err: DiscordError) -> Self {
        match err {
            DiscordError::InvalidGrant(_) => ApiError::input("Invalid token exchange"),
            DiscordError::Upstream(_) => ApiError::upstream("OAuth callback failed"),
        }
    }
}

/// Generate a random state string for OAuth (32 hex characters)
pub fn generate_oauth_state() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    hex::encode(bytes)
}

/// Discord OAuth service
pub struct DiscordOAuthService {
    client: Client,
    api_base: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl DiscordOAuthService {
    pub fn new(config: &DiscordOAuthConfig, api_base: &str, client: Client) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Generate authorization URL for OAuth flow
    pub fn authorization_url(&self, state: &str) -> Result<String, DiscordError> {
        let url = Url::parse_with_params(
            &format!("{}/oauth2/authorize", self.api_base),
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", DISCORD_SCOPE),
                ("state", state),
            ],
        )
        .map_err(|e| DiscordError::Upstream(format!("invalid Discord API base: {}", e)))?;

        Ok(url.into())
    }

    /// Exchange authorization code for the Discord identity
    pub async fn exchange_code(&self, code: &str) -> Result<IdentityClaims, DiscordError> {
        let access_token = self.request_access_token(code).await?;
        self.fetch_user(&access_token).await
    }

    async fn request_access_token(&self, code: &str) -> Result<String, DiscordError> {
        let response = self
            .client
            .post(format!("{}/oauth2/token", self.api_base))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DiscordError::Upstream(format!("token exchange: {}", e)))?;

        let status = response.status();
        // Throttling is an upstream condition, not a bad code
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DiscordError::Upstream(format!(
                "token endpoint returned {}",
                status
            )));
        }

        // Client errors carry an OAuth error body; anything undecodable is still a rejected code
        let token: DiscordTokenResponse = response.json().await.unwrap_or_default();

        match token.access_token.as_deref().filter(|t| !t.is_empty()) {
            Some(access_token) if status.is_success() => Ok(access_token.to_string()),
            _ => Err(DiscordError::InvalidGrant(describe_rejection(status, &token))),
        }
    }

    async fn fetch_user(&self, access_token: &str) -> Result<IdentityClaims, DiscordError> {
        let response = self
            .client
            .get(format!("{}/users/@me", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| DiscordError::Upstream(format!("user fetch: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscordError::Upstream(format!(
                "user endpoint returned {}",
                status
            )));
        }

        let user: DiscordUser = response
            .json()
            .await
            .map_err(|e| DiscordError::Upstream(format!("user decode: {}", e)))?;

        Ok(user.into())
    }
}

fn describe_rejection(status: StatusCode, token: &DiscordTokenResponse) -> String {
    match (&token.error, &token.error_description) {
        (Some(error), Some(description)) => format!("{}: {}", error, description),
        (Some(error), None) => error.clone(),
        _ if status.is_success() => "no access token in response".to_string(),
        _ => format!("token endpoint returned {}", status),
    }
}

#[derive(Debug, Default, Deserialize)]
struct DiscordTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
    #[serde(default)]
    discriminator: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    global_name: Option<String>,
}

impl From<DiscordUser> for IdentityClaims {
    fn from(user: DiscordUser) -> Self {
        IdentityClaims {
            id: user.id,
            username: user.username,
            discriminator: user.discriminator,
            avatar: user.avatar,
            global_name: user.global_name,
        }
    }
}
