//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Issuer claim embedded in every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Access token TTL in hours.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_hours: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: default_issuer(),
            access_ttl_hours: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "chathub".to_string()
}

fn default_access_ttl() -> u64 {
    3
}

fn default_refresh_ttl() -> u64 {
    72
}

fn default_password_min() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_refresh_window_beyond_access_window() {
        let config: AuthConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.access_ttl_hours, 3);
        assert_eq!(config.refresh_ttl_hours, 72);
        assert!(config.refresh_ttl_hours >= config.access_ttl_hours);
        assert_eq!(config.issuer, "chathub");
    }
}
