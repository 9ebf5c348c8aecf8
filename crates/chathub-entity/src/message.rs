//! Chat message value object.

use serde::{Deserialize, Serialize};

/// A single chat message as carried on the wire and archived.
///
/// The shape is identical in both places: `{ "from": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender identifier (self-reported by the client).
    pub from: String,
    /// Message body.
    pub message: String,
}

impl ChatMessage {
    /// Create a new chat message.
    pub fn new(from: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            message: message.into(),
        }
    }
}
