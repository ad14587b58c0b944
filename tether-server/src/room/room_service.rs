use crate::room::{Outbox, RoomCommand, RoomHandle, RoomManager};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tether_core::ConnectionId;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Single task owning all room and connection state.
///
/// Every mutation runs to completion before its outbound events are handed to
/// [`SignalingOutput`], so no reader ever sees a half-applied join or leave.
pub struct RoomService {
    manager: RoomManager,
    command_rx: mpsc::Receiver<RoomCommand>,
    disconnect_rx: mpsc::UnboundedReceiver<ConnectionId>,
    signaling: Arc<dyn SignalingOutput>,
}

impl RoomService {
    pub fn new(
        command_rx: mpsc::Receiver<RoomCommand>,
        disconnect_rx: mpsc::UnboundedReceiver<ConnectionId>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            manager: RoomManager::new(),
            command_rx,
            disconnect_rx,
            signaling,
        }
    }

    /// Starts the service on the current runtime and returns its handle.
    pub fn spawn(command_buffer: usize, signaling: Arc<dyn SignalingOutput>) -> RoomHandle {
        let (command_tx, command_rx) = mpsc::channel(command_buffer);
        let (disconnect_tx, disconnect_rx) = mpsc::unbounded_channel();

        let service = Self::new(command_rx, disconnect_rx, signaling);
        tokio::spawn(service.run());

        RoomHandle::new(command_tx, disconnect_tx)
    }

    pub async fn run(mut self) {
        info!("Room service event loop started");

        loop {
            tokio::select! {
                biased;

                conn = self.disconnect_rx.recv() => {
                    match conn {
                        Some(conn_id) => self.handle_disconnect(conn_id).await,
                        None => {
                            info!("Disconnect channel closed. Shutting down room service.");
                            break;
                        }
                    }
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down room service.");
                            break;
                        }
                    }
                }
            }
        }

        info!("Room service event loop finished");
    }

    async fn handle_disconnect(&mut self, conn_id: ConnectionId) {
        let mut out = Outbox::new();
        if self.manager.unregister(&conn_id, &mut out) {
            info!("Connection {} unregistered", conn_id);
        }
        self.flush(out).await;
    }

    async fn handle_command(&mut self, cmd: RoomCommand) {
        let mut out = Outbox::new();

        match cmd {
            RoomCommand::Register { reply } => {
                let conn_id = self.manager.register();
                if reply.send(conn_id).is_err() {
                    // Caller went away before getting its id.
                    self.manager.unregister(&conn_id, &mut out);
                }
            }

            RoomCommand::Join { conn_id, room_id } => {
                self.manager.join(conn_id, room_id, &mut out);
            }

            RoomCommand::Leave { conn_id, room_id } => {
                if !self.manager.leave(&conn_id, &room_id, &mut out) {
                    debug!("Connection {} is not in room {}", conn_id, room_id);
                }
            }

            RoomCommand::Relay {
                sender_id,
                target_id,
                room_id,
                kind,
                payload,
            } => {
                self.manager
                    .relay(sender_id, target_id, &room_id, kind, payload, &mut out);
            }

            RoomCommand::RoomStats { room_id, reply } => {
                let _ = reply.send(self.manager.room_stats(&room_id));
            }

            RoomCommand::ServerStats { reply } => {
                let _ = reply.send(self.manager.server_stats());
            }
        }

        self.flush(out).await;
    }

    async fn flush(&self, out: Outbox) {
        for delivery in out {
            self.signaling
                .send_message(delivery.target, delivery.message)
                .await;
        }
    }
}

