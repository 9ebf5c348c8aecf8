//! Broadcast hub — membership set plus the single dispatch loop.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use chathub_core::config::chat::ChatConfig;
use chathub_core::error::AppError;
use chathub_core::result::AppResult;
use chathub_core::traits::MessageArchive;
use chathub_entity::message::ChatMessage;

use crate::client::{ClientHandle, ClientId};

/// One inbound message together with its originating client.
#[derive(Debug)]
struct Envelope {
    /// Client the message arrived from. Excluded from fan-out.
    sender: ClientId,
    /// The decoded message.
    message: ChatMessage,
}

/// The broadcast chat hub.
///
/// All inbound messages are funneled through one mpsc channel into a single
/// dispatch task, so fan-out and membership removal happen on one logical
/// thread no matter how many producer connections exist. Read tasks only
/// insert into and remove from the concurrent client map.
#[derive(Debug)]
pub struct ChatHub {
    /// Registered clients.
    clients: Arc<DashMap<ClientId, Arc<ClientHandle>>>,
    /// Producer side of the dispatch channel.
    dispatch_tx: mpsc::Sender<Envelope>,
    /// Outbound buffer size handed to each new client.
    client_buffer_size: usize,
}

impl ChatHub {
    /// Create the hub and spawn its dispatch loop.
    ///
    /// The dispatch task runs for the lifetime of the process; it exits only
    /// when every producer handle (the hub itself) has been dropped.
    pub fn new(config: &ChatConfig, archive: Arc<dyn MessageArchive>) -> Self {
        let clients: Arc<DashMap<ClientId, Arc<ClientHandle>>> = Arc::new(DashMap::new());
        let (dispatch_tx, dispatch_rx) = mpsc::channel(config.dispatch_buffer_size);

        tokio::spawn(dispatch_loop(Arc::clone(&clients), archive, dispatch_rx));

        Self {
            clients,
            dispatch_tx,
            client_buffer_size: config.client_buffer_size,
        }
    }

    /// Register a new client.
    ///
    /// Returns the client handle and the receiver to drain into the
    /// client's transport.
    pub fn register(&self) -> (Arc<ClientHandle>, mpsc::Receiver<ChatMessage>) {
        let (tx, rx) = mpsc::channel(self.client_buffer_size);
        let handle = Arc::new(ClientHandle::new(tx));
        self.clients.insert(handle.id, Arc::clone(&handle));

        info!(client_id = %handle.id, clients = self.clients.len(), "Chat client registered");
        (handle, rx)
    }

    /// Remove a client from the membership set.
    ///
    /// Called on every read-loop exit path; removing an already-removed
    /// client is a no-op.
    pub fn unregister(&self, id: &ClientId) {
        if let Some((_, handle)) = self.clients.remove(id) {
            handle.mark_dead();
            info!(client_id = %id, clients = self.clients.len(), "Chat client unregistered");
        }
    }

    /// Hand an inbound message off to the dispatch loop.
    pub async fn submit(&self, sender: ClientId, message: ChatMessage) -> AppResult<()> {
        self.dispatch_tx
            .send(Envelope { sender, message })
            .await
            .map_err(|_| AppError::internal("Dispatch loop is no longer running"))
    }

    /// Number of currently registered clients.
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

/// The single dispatch loop.
///
/// Receives one envelope at a time, archives it, and writes it to every
/// registered client except the sender. A client whose channel has closed is
/// removed from membership; the failure never interrupts delivery to the
/// remaining clients.
async fn dispatch_loop(
    clients: Arc<DashMap<ClientId, Arc<ClientHandle>>>,
    archive: Arc<dyn MessageArchive>,
    mut rx: mpsc::Receiver<Envelope>,
) {
    while let Some(envelope) = rx.recv().await {
        // Archiving must never block or abort the broadcast.
        let archive_task = Arc::clone(&archive);
        let message = envelope.message.clone();
        tokio::spawn(async move {
            if let Err(e) = archive_task.append(&message.from, &message.message).await {
                error!(error = %e, "Failed to archive chat message");
            }
        });

        let mut dead = Vec::new();
        for entry in clients.iter() {
            let client = entry.value();
            if client.id == envelope.sender {
                continue;
            }
            if !client.send(envelope.message.clone()) && !client.is_alive() {
                dead.push(client.id);
            }
        }

        for id in dead {
            clients.remove(&id);
            warn!(client_id = %id, "Removed dead client from hub");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Archive double that forwards every append to a channel.
    struct RecordingArchive {
        tx: mpsc::UnboundedSender<ChatMessage>,
    }

    #[async_trait]
    impl MessageArchive for RecordingArchive {
        async fn append(&self, from: &str, body: &str) -> AppResult<()> {
            let _ = self.tx.send(ChatMessage::new(from, body));
            Ok(())
        }
    }

    /// Archive double that always fails.
    struct FailingArchive;

    #[async_trait]
    impl MessageArchive for FailingArchive {
        async fn append(&self, _from: &str, _body: &str) -> AppResult<()> {
            Err(AppError::database("archive unavailable"))
        }
    }

    fn hub_with_recording() -> (ChatHub, mpsc::UnboundedReceiver<ChatMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = ChatHub::new(&ChatConfig::default(), Arc::new(RecordingArchive { tx }));
        (hub, rx)
    }

    #[tokio::test]
    async fn broadcast_reaches_everyone_but_the_sender() {
        let (hub, _archive_rx) = hub_with_recording();
        let (a, mut a_rx) = hub.register();
        let (_b, mut b_rx) = hub.register();
        let (_c, mut c_rx) = hub.register();

        hub.submit(a.id, ChatMessage::new("alice", "hello"))
            .await
            .unwrap();

        let b_msg = b_rx.recv().await.unwrap();
        let c_msg = c_rx.recv().await.unwrap();
        assert_eq!(b_msg, ChatMessage::new("alice", "hello"));
        assert_eq!(c_msg, ChatMessage::new("alice", "hello"));

        // The sender's own stream stays quiet.
        assert!(a_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn messages_arrive_in_submission_order() {
        let (hub, _archive_rx) = hub_with_recording();
        let (a, _a_rx) = hub.register();
        let (_b, mut b_rx) = hub.register();

        for i in 0..5 {
            hub.submit(a.id, ChatMessage::new("alice", format!("msg-{i}")))
                .await
                .unwrap();
        }

        for i in 0..5 {
            let msg = b_rx.recv().await.unwrap();
            assert_eq!(msg.message, format!("msg-{i}"));
        }
    }

    #[tokio::test]
    async fn dead_client_is_removed_and_others_still_receive() {
        let (hub, _archive_rx) = hub_with_recording();
        let (a, _a_rx) = hub.register();
        let (_b, b_rx) = hub.register();
        let (_c, mut c_rx) = hub.register();
        assert_eq!(hub.client_count(), 3);

        // Break B's connection before dispatch.
        drop(b_rx);

        hub.submit(a.id, ChatMessage::new("alice", "first"))
            .await
            .unwrap();
        assert_eq!(c_rx.recv().await.unwrap().message, "first");

        // A second message confirms the first dispatch cycle completed,
        // including B's removal from membership.
        hub.submit(a.id, ChatMessage::new("alice", "second"))
            .await
            .unwrap();
        assert_eq!(c_rx.recv().await.unwrap().message, "second");
        assert_eq!(hub.client_count(), 2);
    }

    #[tokio::test]
    async fn every_dispatched_message_is_archived() {
        let (hub, mut archive_rx) = hub_with_recording();
        let (a, _a_rx) = hub.register();

        hub.submit(a.id, ChatMessage::new("alice", "for the record"))
            .await
            .unwrap();

        let archived = archive_rx.recv().await.unwrap();
        assert_eq!(archived, ChatMessage::new("alice", "for the record"));
    }

    #[tokio::test]
    async fn archive_failure_does_not_stop_delivery() {
        let hub = ChatHub::new(&ChatConfig::default(), Arc::new(FailingArchive));
        let (a, _a_rx) = hub.register();
        let (_b, mut b_rx) = hub.register();

        hub.submit(a.id, ChatMessage::new("alice", "still delivered"))
            .await
            .unwrap();

        assert_eq!(b_rx.recv().await.unwrap().message, "still delivered");
    }

    #[tokio::test]
    async fn unregister_is_idempotent() {
        let (hub, _archive_rx) = hub_with_recording();
        let (a, _a_rx) = hub.register();
        assert_eq!(hub.client_count(), 1);

        hub.unregister(&a.id);
        hub.unregister(&a.id);
        assert_eq!(hub.client_count(), 0);
        assert!(!a.is_alive());
    }
}
