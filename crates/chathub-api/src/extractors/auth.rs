//! Token extractors for the `Authorization` header.
//!
//! The header carries the raw signed token string, without a `Bearer `
//! prefix. [`RawToken`] hands over the string untouched (refresh and
//! logout work on the presented value); [`AuthUser`] additionally
//! validates it as an access token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use chathub_auth::jwt::Claims;
use chathub_core::error::AppError;

use crate::state::AppState;

/// The raw token string presented in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct RawToken(pub String);

impl FromRequestParts<AppState> for RawToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        Ok(RawToken(token.to_string()))
    }
}

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Validated access token claims.
    pub claims: Claims,
    /// The raw token as presented.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RawToken(token) = RawToken::from_request_parts(parts, state).await?;
        let claims = state.jwt_decoder.decode_access_token(&token)?;

        Ok(AuthUser { claims, token })
    }
}
