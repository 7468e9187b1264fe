// Session token codec
// Decision: Use HS256 algorithm for simplicity (symmetric key, verification needs only the secret)
// Decision: The Discord identity is embedded in the token; there is no server-side session store
// Decision: Expiry is checked with zero leeway and the expiry instant itself counts as expired

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::JwtConfig;

/// Token codec failures.
///
/// `Malformed`, `SignatureInvalid` and `Expired` are for diagnostics only;
/// the HTTP layer reports all of them as the same 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("session lifetime out of range")]
    InvalidLifetime,

    #[error("identity claims require a non-empty id and username")]
    InvalidClaims,

    #[error("malformed token")]
    Malformed,

    #[error("token signature invalid")]
    SignatureInvalid,

    #[error("token expired")]
    Expired,

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Discord identity carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Discord user ID (snowflake as string)
    pub id: String,
    pub username: String,
    /// Legacy discriminator; "0" or absent for migrated accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// Avatar hash
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
}

impl IdentityClaims {
    /// `username#discriminator`, or the bare username for accounts without one
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(d) if !d.is_empty() && d != "0" => format!("{}#{}", self.username, d),
            _ => self.username.clone(),
        }
    }

    fn is_valid(&self) -> bool {
        !self.id.trim().is_empty() && !self.username.trim().is_empty()
    }
}

/// JWT claims for session tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
struct SessionClaims {
    #[serde(flatten)]
    identity: IdentityClaims,
    /// Issued at (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// JWT service for session token issuance and verification
#[derive(Clone)]
pub struct SessionTokenService {
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokenService {
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let lifetime = Duration::from_std(config.session_lifetime)
            .map_err(|_| TokenError::InvalidLifetime)?;
        if lifetime <= Duration::zero() {
            return Err(TokenError::InvalidLifetime);
        }

        // Expiry is enforced in `verify_at` against an explicit clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            lifetime,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Issue a session token for a verified identity
    pub fn issue(&self, identity: &IdentityClaims) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a session token as of `now`
    pub fn issue_at(
        &self,
        identity: &IdentityClaims,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if !identity.is_valid() {
            return Err(TokenError::InvalidClaims);
        }

        let exp = now + self.lifetime;
        let claims = SessionClaims {
            identity: identity.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a presented token and return the identity it carries
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a presented token as of `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, TokenError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims.identity)
    }

    /// Session lifetime in seconds (used for cookie Max-Age)
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }
}
