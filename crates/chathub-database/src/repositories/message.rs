//! Chat message archive repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use chathub_core::error::{AppError, ErrorKind};
use chathub_core::result::AppResult;
use chathub_core::traits::MessageArchive;
use chathub_entity::message::ChatMessage;

/// Append-only document store for chat messages.
///
/// Each message is stored as one JSONB document whose shape mirrors the
/// wire payload, so the archive can be read back without any mapping layer.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one message document to the archive.
    pub async fn insert(&self, message: &ChatMessage) -> AppResult<()> {
        sqlx::query("INSERT INTO chat_messages (doc) VALUES ($1)")
            .bind(Json(message))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to archive message", e)
            })?;
        Ok(())
    }

    /// Return every archived message in insertion order.
    pub async fn list_all(&self) -> AppResult<Vec<ChatMessage>> {
        let docs = sqlx::query_scalar::<_, Json<ChatMessage>>(
            "SELECT doc FROM chat_messages ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))?;

        Ok(docs.into_iter().map(|doc| doc.0).collect())
    }
}

#[async_trait]
impl MessageArchive for MessageRepository {
    async fn append(&self, from: &str, body: &str) -> AppResult<()> {
        self.insert(&ChatMessage::new(from, body)).await
    }
}
