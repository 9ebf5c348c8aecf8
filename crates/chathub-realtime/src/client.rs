//! Individual chat client handle.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use uuid::Uuid;

use chathub_entity::message::ChatMessage;

/// Unique client identifier, valid for the lifetime of one connection.
pub type ClientId = Uuid;

/// A handle to a single connected chat client.
///
/// Holds the sender half of the client's outbound channel; the receiver
/// half is drained by the connection's forwarder task into the transport.
#[derive(Debug)]
pub struct ClientHandle {
    /// Unique client ID.
    pub id: ClientId,
    /// Sender for outbound messages.
    sender: mpsc::Sender<ChatMessage>,
    /// Whether the client is still alive.
    alive: AtomicBool,
}

impl ClientHandle {
    /// Create a new client handle around an outbound sender.
    pub fn new(sender: mpsc::Sender<ChatMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Send an outbound message to this client.
    ///
    /// Returns `false` when the message was not delivered. A full buffer
    /// drops the message but keeps the client; a closed channel marks the
    /// client dead so the hub can remove it.
    pub fn send(&self, msg: ChatMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(client_id = %self.id, "Client send buffer full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if the client is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the client as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
