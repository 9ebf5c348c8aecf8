//! WebSocket chat handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{error, info, warn};

use chathub_core::error::AppError;
use chathub_entity::message::ChatMessage;

use crate::state::AppState;

/// GET /ws/chat — WebSocket upgrade
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

/// Handles an established WebSocket connection.
///
/// Registers the client with the hub, forwards hub messages out, and feeds
/// inbound frames into the dispatch channel. Any read failure, including a
/// malformed frame, closes only this connection.
async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.hub.register();
    let client_id = handle.id;

    info!(client_id = %client_id, "Chat connection established");

    // Forward hub messages to the client.
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(t) => t,
                Err(e) => {
                    error!(error = %e, "Failed to serialize outbound chat message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Inbound read loop.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let msg: ChatMessage = match serde_json::from_str(text.as_str()) {
                    Ok(m) => m,
                    Err(e) => {
                        // The connection is presumed broken; no retry.
                        let err = AppError::protocol(format!("Malformed chat frame: {e}"));
                        warn!(client_id = %client_id, error = %err, "Closing chat connection");
                        break;
                    }
                };
                if state.hub.submit(client_id, msg).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(client_id = %client_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Cleanup runs on every exit path.
    outbound_task.abort();
    state.hub.unregister(&client_id);

    info!(client_id = %client_id, "Chat connection closed");
}
