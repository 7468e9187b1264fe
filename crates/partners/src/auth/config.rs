// Authentication configuration loaded from environment variables.
// Decision: JWT_SECRET is mandatory; the server refuses to start without it
// Decision: Discord OAuth is optional so the introspection endpoint works without client credentials

use anyhow::{bail, Result};
use std::time::Duration;

/// Default Discord API base (overridable for tests and proxies)
pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api";

/// Default page the OAuth callback redirects to
pub const DEFAULT_POST_LOGIN_REDIRECT: &str = "/partners/partners.html";

/// Default session lifetime (7 days)
pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Discord OAuth application credentials
#[derive(Debug, Clone)]
pub struct DiscordOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing session tokens
    pub secret: String,
    /// Session token and cookie lifetime
    pub session_lifetime: Duration,
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    /// Discord OAuth configuration (None disables the login flow)
    pub discord: Option<DiscordOAuthConfig>,
    /// Discord API base URL, without trailing slash
    pub discord_api_base: String,
    /// Where the callback sends the browser after a successful login
    pub post_login_redirect: String,
}

impl AuthConfig {
    /// Load configuration through a key lookup (environment in production)
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>, base_url: &str) -> Result<Self> {
        let Some(secret) = non_empty(lookup, "JWT_SECRET") else {
            bail!("JWT_SECRET environment variable required");
        };

        let session_lifetime = match non_empty(lookup, "SESSION_TTL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => bail!("SESSION_TTL_SECS must be a positive number of seconds"),
            },
            None => DEFAULT_SESSION_LIFETIME,
        };

        let discord = match (
            non_empty(lookup, "DISCORD_CLIENT_ID"),
            non_empty(lookup, "DISCORD_CLIENT_SECRET"),
        ) {
            (Some(client_id), Some(client_secret)) => {
                let redirect_uri = non_empty(lookup, "DISCORD_REDIRECT_URI")
                    .unwrap_or_else(|| format!("{}/api/auth/discord/callback", base_url));
                Some(DiscordOAuthConfig {
                    client_id,
                    client_secret,
                    redirect_uri,
                })
            }
            _ => {
                tracing::warn!(
                    "DISCORD_CLIENT_ID/DISCORD_CLIENT_SECRET not set, Discord login disabled"
                );
                None
            }
        };

        let discord_api_base = non_empty(lookup, "DISCORD_API_BASE")
            .unwrap_or_else(|| DEFAULT_DISCORD_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let post_login_redirect = non_empty(lookup, "PARTNERS_REDIRECT_PATH")
            .unwrap_or_else(|| DEFAULT_POST_LOGIN_REDIRECT.to_string());

        Ok(Self {
            jwt: JwtConfig {
                secret,
                session_lifetime,
            },
            discord,
            discord_api_base,
            post_login_redirect,
        })
    }

    /// Check if the Discord login flow is available
    pub fn oauth_enabled(&self) -> bool {
        self.discord.is_some()
    }
}

/// Look up a key, treating empty values as unset
pub(crate) fn non_empty(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}
