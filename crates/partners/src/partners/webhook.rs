// Discord webhook relay for partner applications
// Decision: One POST per submission, never retried (the user can resubmit)
// Decision: Any non-2xx answer is a relay failure; the body is kept for the logs

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use super::application::PartnerApplication;
use crate::auth::IdentityClaims;

/// Name the webhook message is posted under
pub const WEBHOOK_USERNAME: &str = "Bloxion Partners";

/// Embed accent color
pub const EMBED_COLOR: u32 = 0x00d2ff;

/// Relay failures
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook responded with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Webhook execute body (subset of Discord's schema)
#[derive(Debug, Clone, Serialize)]
pub struct WebhookMessage {
    pub username: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    /// ISO 8601 timestamp
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// Build the webhook message for a validated application
pub fn application_message(
    user: &IdentityClaims,
    application: &PartnerApplication,
    now: DateTime<Utc>,
) -> WebhookMessage {
    let mut fields = vec![
        EmbedField::new("👤 Discord User", format!("{} ({})", user.tag(), user.id)),
        EmbedField::new("🏢 Roblox Group", application.group.as_str()),
    ];
    if let Some(username) = &application.roblox_username {
        fields.push(EmbedField::new("🎮 Roblox Username", username.as_str()));
    }
    fields.push(EmbedField::new("💬 Reason", application.reason.as_str()));

    WebhookMessage {
        username: WEBHOOK_USERNAME.to_string(),
        embeds: vec![Embed {
            title: "📝 New Partner Application".to_string(),
            color: EMBED_COLOR,
            fields,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }],
    }
}

/// Webhook relay bound to one destination URL
pub struct WebhookRelay {
    client: Client,
    url: String,
}

impl WebhookRelay {
    pub fn new(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Deliver a message; exactly one outbound request
    pub async fn send(&self, message: &WebhookMessage) -> Result<(), RelayError> {
        let response = self.client.post(&self.url).json(message).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Rejected { status, body });
        }

        Ok(())
    }
}
