use crate::error::ServiceError;
use crate::room::{RoomCommand, RoomStats, ServerStats};
use serde_json::Value;
use tether_core::{ConnectionId, RelayKind, RoomId};
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

/// Cloneable front door to a running [`crate::RoomService`].
#[derive(Clone, Debug)]
pub struct RoomHandle {
    command_tx: mpsc::Sender<RoomCommand>,
    disconnect_tx: mpsc::UnboundedSender<ConnectionId>,
}

impl RoomHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<RoomCommand>,
        disconnect_tx: mpsc::UnboundedSender<ConnectionId>,
    ) -> Self {
        Self {
            command_tx,
            disconnect_tx,
        }
    }

    pub async fn send(&self, cmd: RoomCommand) -> Result<(), ServiceError> {
        self.command_tx.send(cmd).await?;
        Ok(())
    }

    pub async fn register(&self) -> Result<ConnectionId, ServiceError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::Register { reply }).await?;
        Ok(rx.await?)
    }

    /// Schedules teardown of `conn_id`. Never blocks, so it is safe to call from
    /// any exit path of a connection task. Processed ahead of queued commands.
    pub fn disconnect(&self, conn_id: ConnectionId) {
        if self.disconnect_tx.send(conn_id).is_err() {
            warn!("Room service gone, dropping disconnect of {}", conn_id);
        }
    }

    pub async fn join(&self, conn_id: ConnectionId, room_id: RoomId) -> Result<(), ServiceError> {
        self.send(RoomCommand::Join { conn_id, room_id }).await
    }

    pub async fn leave(&self, conn_id: ConnectionId, room_id: RoomId) -> Result<(), ServiceError> {
        self.send(RoomCommand::Leave { conn_id, room_id }).await
    }

    pub async fn relay(
        &self,
        sender_id: ConnectionId,
        target_id: ConnectionId,
        room_id: RoomId,
        kind: RelayKind,
        payload: Value,
    ) -> Result<(), ServiceError> {
        self.send(RoomCommand::Relay {
            sender_id,
            target_id,
            room_id,
            kind,
            payload,
        })
        .await
    }

    pub async fn room_stats(&self, room_id: RoomId) -> Result<RoomStats, ServiceError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::RoomStats { room_id, reply }).await?;
        Ok(rx.await?)
    }

    pub async fn server_stats(&self) -> Result<ServerStats, ServiceError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomCommand::ServerStats { reply }).await?;
        Ok(rx.await?)
    }
}
