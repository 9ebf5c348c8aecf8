//! Message archive trait consumed by the broadcast hub.

use async_trait::async_trait;

use crate::result::AppResult;

/// Durable append-only store for chat messages.
///
/// The broadcast hub writes through this trait so the dispatch loop can be
/// tested against an in-memory implementation. The concrete PostgreSQL
/// implementation lives in `chathub-database`.
#[async_trait]
pub trait MessageArchive: Send + Sync + 'static {
    /// Append a single chat message to the archive.
    async fn append(&self, from: &str, body: &str) -> AppResult<()>;
}
