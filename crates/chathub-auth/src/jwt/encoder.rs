//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use chathub_core::config::auth::AuthConfig;
use chathub_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Issuer claim.
    issuer: String,
    /// Access token TTL in hours.
    access_ttl_hours: i64,
    /// Refresh token TTL in hours.
    refresh_ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("access_ttl_hours", &self.access_ttl_hours)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_ttl_hours: config.access_ttl_hours as i64,
            refresh_ttl_hours: config.refresh_ttl_hours as i64,
        }
    }

    /// Generates a single signed token of the given kind.
    pub fn issue(
        &self,
        username: &str,
        full_name: &str,
        kind: TokenType,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let ttl_hours = match kind {
            TokenType::Access => self.access_ttl_hours,
            TokenType::Refresh => self.refresh_ttl_hours,
        };
        let exp = now + chrono::Duration::hours(ttl_hours);

        let claims = Claims {
            username: username.to_string(),
            full_name: full_name.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            token_type: kind,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, exp))
    }

    /// Generates a new access + refresh token pair for the given user.
    pub fn issue_pair(&self, username: &str, full_name: &str) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) =
            self.issue(username, full_name, TokenType::Access)?;
        let (refresh_token, refresh_expires_at) =
            self.issue(username, full_name, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }
}
