use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tether_core::{ConnectionId, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, error};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Outbound side of every open WebSocket: one unbounded queue per connection,
/// drained by that connection's writer task.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
            }),
        }
    }

    pub fn add_connection(&self, conn_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(conn_id, tx);
    }

    pub fn remove_connection(&self, conn_id: &ConnectionId) {
        self.inner.connections.remove(conn_id);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    pub fn send_signal(&self, conn_id: ConnectionId, msg: ServerMessage) {
        let Some(conn) = self.inner.connections.get(&conn_id) else {
            debug!("Dropping signal for closed connection {}", conn_id);
            return;
        };

        match serde_json::to_string(&msg) {
            Ok(json) => {
                if let Err(e) = conn.send(Message::Text(json.into())) {
                    error!("Failed to queue WS message to {}: {:?}", conn_id, e);
                }
            }
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_message(&self, conn_id: ConnectionId, msg: ServerMessage) {
        self.send_signal(conn_id, msg);
    }
}
