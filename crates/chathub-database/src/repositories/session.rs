//! Session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use chathub_core::error::{AppError, ErrorKind};
use chathub_core::result::AppResult;
use chathub_entity::session::{CreateSession, Session};

/// Repository for session rows.
///
/// One row per login. Refresh locates the row by refresh token; logout
/// deletes the row by the presented access token value.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new session row.
    pub async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, token, refresh_token, token_expired, refresh_token_expired) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.token)
        .bind(&data.refresh_token)
        .bind(data.token_expired)
        .bind(data.refresh_token_expired)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    /// Replace the access token of the session matching `refresh_token`.
    ///
    /// Returns `NotFound` when no session row holds that refresh token
    /// (stale or forged token); callers surface this as an authentication
    /// failure.
    pub async fn update_access_token(
        &self,
        new_token: &str,
        refresh_token: &str,
        new_expiry: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE sessions SET token = $1, token_expired = $3 WHERE refresh_token = $2",
        )
        .bind(new_token)
        .bind(refresh_token)
        .bind(new_expiry)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update session", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("No session for refresh token"));
        }
        Ok(())
    }

    /// Delete the session whose access token equals `token`.
    ///
    /// Idempotent: deleting an unknown token succeeds with a count of zero.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session", e)
            })?;

        Ok(result.rows_affected())
    }

    /// Count session rows holding the given access token.
    pub async fn count_by_token(&self, token: &str) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count sessions", e))
    }
}
