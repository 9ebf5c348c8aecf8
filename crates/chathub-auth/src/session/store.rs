//! Session persistence facade over the session repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use chathub_core::result::AppResult;
use chathub_database::repositories::SessionRepository;
use chathub_entity::session::{CreateSession, Session};

use crate::jwt::TokenPair;

/// Persistence boundary for the session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionStore {
    repo: Arc<SessionRepository>,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: Arc<SessionRepository>) -> Self {
        Self { repo }
    }

    /// Persist a freshly issued token pair as a new session row.
    pub async fn create_for_login(&self, user_id: Uuid, tokens: &TokenPair) -> AppResult<Session> {
        self.repo
            .create(&CreateSession {
                user_id,
                token: tokens.access_token.clone(),
                refresh_token: tokens.refresh_token.clone(),
                token_expired: tokens.access_expires_at,
                refresh_token_expired: tokens.refresh_expires_at,
            })
            .await
    }

    /// Swap in a new access token on the session matching `refresh_token`.
    pub async fn update_access_token(
        &self,
        new_token: &str,
        refresh_token: &str,
        new_expiry: DateTime<Utc>,
    ) -> AppResult<()> {
        self.repo
            .update_access_token(new_token, refresh_token, new_expiry)
            .await
    }

    /// Remove the session holding `token`. Idempotent.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<u64> {
        self.repo.delete_by_token(token).await
    }
}
