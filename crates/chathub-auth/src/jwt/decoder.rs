//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use chathub_core::config::auth::AuthConfig;
use chathub_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// Pinning the algorithm to HS256 means a token whose header names any
    /// other algorithm fails with a signature error, regardless of its
    /// payload.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::authentication(
                "Invalid token type: expected refresh token",
            ));
        }

        Ok(claims)
    }

    /// Internal decode without type checking.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature
                    | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        AppError::authentication("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Malformed token")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chathub_core::error::ErrorKind;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn issued_access_token_roundtrips_with_claims_intact() {
        let cfg = config("test-secret");
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let (token, _exp) = encoder.issue("alice", "Alice Doe", TokenType::Access).unwrap();
        let claims = decoder.decode_access_token(&token).unwrap();

        assert_eq!(claims.username, "alice");
        assert_eq!(claims.full_name, "Alice Doe");
        assert_eq!(claims.iss, "chathub");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(!claims.is_expired());
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = config("test-secret");
        let decoder = JwtDecoder::new(&cfg);

        let now = Utc::now();
        let claims = Claims {
            username: "alice".to_string(),
            full_name: "Alice Doe".to_string(),
            iss: "chathub".to_string(),
            iat: now.timestamp() - 7200,
            exp: now.timestamp() - 3600,
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = decoder.decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(err.message.contains("expired"));
    }

    #[test]
    fn token_signed_with_different_secret_fails_as_signature_error() {
        let encoder = JwtEncoder::new(&config("secret-a"));
        let decoder = JwtDecoder::new(&config("secret-b"));

        let (token, _) = encoder.issue("alice", "Alice Doe", TokenType::Access).unwrap();
        let err = decoder.decode_access_token(&token).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(err.message.contains("signature"));
    }

    #[test]
    fn token_with_substituted_algorithm_fails_as_signature_error() {
        let cfg = config("test-secret");
        let decoder = JwtDecoder::new(&cfg);

        let now = Utc::now();
        let claims = Claims {
            username: "mallory".to_string(),
            full_name: "Mallory".to_string(),
            iss: "chathub".to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + 3600,
            token_type: TokenType::Access,
        };
        // Same secret, but HS384 in the header.
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = decoder.decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(err.message.contains("signature"));
    }

    #[test]
    fn refresh_token_is_rejected_where_access_token_expected() {
        let cfg = config("test-secret");
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let pair = encoder.issue_pair("alice", "Alice Doe").unwrap();
        assert!(decoder.decode_access_token(&pair.refresh_token).is_err());
        assert!(decoder.decode_refresh_token(&pair.refresh_token).is_ok());
        assert!(decoder.decode_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn structurally_invalid_token_is_malformed() {
        let decoder = JwtDecoder::new(&config("test-secret"));
        let err = decoder.decode_access_token("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn pair_keeps_refresh_expiry_beyond_access_expiry() {
        let encoder = JwtEncoder::new(&config("test-secret"));
        let pair = encoder.issue_pair("alice", "Alice Doe").unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);
        assert!(pair.refresh_expires_at >= pair.access_expires_at);
    }
}
