//! Application state shared across all handlers.

use std::sync::Arc;

use chathub_auth::jwt::JwtDecoder;
use chathub_auth::session::SessionManager;
use chathub_core::config::AppConfig;
use chathub_database::DatabasePool;
use chathub_database::repositories::MessageRepository;
use chathub_realtime::ChatHub;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool wrapper.
    pub db: DatabasePool,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Chat message archive.
    pub message_repo: Arc<MessageRepository>,
    /// Broadcast chat hub.
    pub hub: Arc<ChatHub>,
}
