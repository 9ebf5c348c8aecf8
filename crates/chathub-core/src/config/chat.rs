//! Broadcast chat hub configuration.

use serde::{Deserialize, Serialize};

/// Broadcast hub configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Outbound buffer size per connected client.
    #[serde(default = "default_client_buffer")]
    pub client_buffer_size: usize,
    /// Buffer size of the shared dispatch channel.
    #[serde(default = "default_dispatch_buffer")]
    pub dispatch_buffer_size: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            client_buffer_size: default_client_buffer(),
            dispatch_buffer_size: default_dispatch_buffer(),
        }
    }
}

fn default_client_buffer() -> usize {
    64
}

fn default_dispatch_buffer() -> usize {
    1024
}
