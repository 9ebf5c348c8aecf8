//! Chat message history handler.

use axum::Json;
use axum::extract::State;

use chathub_core::error::AppError;
use chathub_entity::message::ChatMessage;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/messages — the full archive in insertion order.
pub async fn list_messages(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let messages = state.message_repo.list_all().await?;
    Ok(Json(ApiResponse::ok(messages)))
}
