// Server configuration loaded from environment variables.
// Decision: Read once at startup, passed down explicitly (no globals)
// Decision: A missing WEBHOOK_URL is not fatal; submissions fail with 500 until it is set

use anyhow::{bail, Result};
use std::time::Duration;

use crate::auth::config::{non_empty, AuthConfig};

/// Default public base URL, used to derive the OAuth redirect URI
pub const DEFAULT_BASE_URL: &str = "https://app.bloxion.xyz";

/// Default bind address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";

/// Default timeout for outbound calls (Discord API and webhook)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub base_url: String,
    /// Origins allowed for credentialed CORS requests (empty = same-origin only)
    pub cors_allowed_origins: Vec<String>,
    /// Bound on every outbound HTTP call
    pub http_timeout: Duration,
    /// Discord webhook receiving partner applications
    pub webhook_url: Option<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = non_empty(lookup, "BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr =
            non_empty(lookup, "BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let cors_allowed_origins = non_empty(lookup, "CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let http_timeout = match non_empty(lookup, "HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => bail!("HTTP_TIMEOUT_SECS must be a positive number of seconds"),
            },
            None => DEFAULT_HTTP_TIMEOUT,
        };

        let webhook_url = non_empty(lookup, "WEBHOOK_URL");
        if webhook_url.is_none() {
            tracing::warn!("WEBHOOK_URL not set, partner submissions will fail");
        }

        let auth = AuthConfig::from_lookup(lookup, &base_url)?;

        Ok(Self {
            bind_addr,
            base_url,
            cors_allowed_origins,
            http_timeout,
            webhook_url,
            auth,
        })
    }
}
