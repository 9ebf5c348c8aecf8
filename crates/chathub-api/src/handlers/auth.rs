//! Auth handlers — register, login, refresh, logout.

use axum::Json;
use axum::extract::State;

use chathub_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest, validate_request};
use crate::dto::response::{
    ApiResponse, LoginResponse, MessageResponse, RefreshResponse, UserResponse,
};
use crate::extractors::RawToken;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    validate_request(&req)?;

    let user = state
        .session_manager
        .register(&req.username, &req.password, &req.full_name)
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    validate_request(&req)?;

    let result = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: result.tokens.access_token,
        refresh_token: result.tokens.refresh_token,
        access_expires_at: result.tokens.access_expires_at,
        refresh_expires_at: result.tokens.refresh_expires_at,
        user: UserResponse::from(result.user),
    })))
}

/// POST /api/auth/refresh
///
/// The `Authorization` header carries the refresh token.
pub async fn refresh(
    State(state): State<AppState>,
    RawToken(token): RawToken,
) -> Result<Json<ApiResponse<RefreshResponse>>, AppError> {
    let result = state.session_manager.refresh(&token).await?;

    Ok(Json(ApiResponse::ok(RefreshResponse {
        access_token: result.access_token,
        access_expires_at: result.access_expires_at,
    })))
}

/// POST /api/auth/logout
///
/// The `Authorization` header carries the access token. Idempotent:
/// logging out an already-removed session succeeds.
pub async fn logout(
    State(state): State<AppState>,
    RawToken(token): RawToken,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.session_manager.logout(&token).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}
