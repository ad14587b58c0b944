use crate::registry::ConnectionRegistry;
use crate::room::Room;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tether_core::{ConnectionId, RelayKind, RoomId, ServerMessage};
use tracing::{debug, info};

/// One outbound event addressed to a single connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub target: ConnectionId,
    pub message: ServerMessage,
}

/// Events produced by one mutation, sent only after the mutation is complete.
#[derive(Debug, Default)]
pub struct Outbox {
    deliveries: Vec<Delivery>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: ConnectionId, message: ServerMessage) {
        self.deliveries.push(Delivery { target, message });
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn messages_for(&self, target: &ConnectionId) -> Vec<&ServerMessage> {
        self.deliveries
            .iter()
            .filter(|d| &d.target == target)
            .map(|d| &d.message)
            .collect()
    }
}

impl IntoIterator for Outbox {
    type Item = Delivery;
    type IntoIter = std::vec::IntoIter<Delivery>;

    fn into_iter(self) -> Self::IntoIter {
        self.deliveries.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinResult {
    pub participant_count: usize,
    pub is_initiator: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStats {
    pub member_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStats {
    pub active_rooms: usize,
    pub total_participants: usize,
    pub connections: usize,
}

/// Authoritative room table together with the connection registry.
///
/// Both sides of the membership relation are updated inside the same `&mut self`
/// call, so `registry.current_room(c) == Some(r)` holds exactly when `c` is a
/// member of `r` between any two calls. Empty rooms are never kept.
#[derive(Debug, Default)]
pub struct RoomManager {
    rooms: HashMap<RoomId, Room>,
    registry: ConnectionRegistry,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> ConnectionId {
        self.registry.register()
    }

    /// Removes the connection from its room (if any) and forgets it.
    /// Calling this twice for the same id is a no-op.
    pub fn unregister(&mut self, conn_id: &ConnectionId, out: &mut Outbox) -> bool {
        if let Some(room_id) = self.registry.current_room(conn_id).cloned() {
            self.leave(conn_id, &room_id, out);
        }
        self.registry.unregister(conn_id)
    }

    pub fn is_registered(&self, conn_id: &ConnectionId) -> bool {
        self.registry.contains(conn_id)
    }

    pub fn current_room(&self, conn_id: &ConnectionId) -> Option<&RoomId> {
        self.registry.current_room(conn_id)
    }

    /// Returns `None` when `conn_id` is not a registered connection.
    pub fn join(
        &mut self,
        conn_id: ConnectionId,
        room_id: RoomId,
        out: &mut Outbox,
    ) -> Option<JoinResult> {
        if !self.registry.contains(&conn_id) {
            debug!("Ignoring join from unregistered connection {}", conn_id);
            return None;
        }

        match self.registry.current_room(&conn_id).cloned() {
            Some(current) if current == room_id => {
                let participant_count = self.room_stats(&room_id).member_count;
                let result = JoinResult {
                    participant_count,
                    is_initiator: participant_count == 1,
                };
                debug!("Connection {} re-joined room {}", conn_id, room_id);
                out.push(conn_id, room_joined(room_id, result));
                return Some(result);
            }
            Some(previous) => {
                info!(
                    "Connection {} switching from room {} to {}",
                    conn_id, previous, room_id
                );
                self.leave(&conn_id, &previous, out);
            }
            None => {}
        }

        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating new room: {}", room_id);
            Room::new(room_id.clone())
        });
        room.insert(conn_id);
        self.registry.set_room(&conn_id, Some(room_id.clone()));

        let participant_count = room.len();
        let result = JoinResult {
            participant_count,
            is_initiator: participant_count == 1,
        };

        for member in room.others(&conn_id) {
            out.push(
                member,
                ServerMessage::UserJoined {
                    user_id: conn_id,
                    participant_count,
                },
            );
        }
        info!(
            "Connection {} joined room {} ({} participants)",
            conn_id, room_id, participant_count
        );
        out.push(conn_id, room_joined(room_id, result));

        Some(result)
    }

    /// Shared by explicit `leave-room` and connection teardown.
    /// Returns `false` if `conn_id` was not a member of `room_id`.
    pub fn leave(&mut self, conn_id: &ConnectionId, room_id: &RoomId, out: &mut Outbox) -> bool {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return false;
        };
        if !room.remove(conn_id) {
            return false;
        }
        self.registry.set_room(conn_id, None);

        if room.is_empty() {
            self.rooms.remove(room_id);
            info!("Room {} deleted (empty)", room_id);
            return true;
        }

        let participant_count = room.len();
        for member in room.members() {
            out.push(
                *member,
                ServerMessage::UserLeft {
                    user_id: *conn_id,
                    participant_count,
                },
            );
        }
        info!(
            "Connection {} left room {} ({} participants)",
            conn_id, room_id, participant_count
        );
        true
    }

    /// Forwards `payload` to `target_id` if it is currently in `room_id`.
    /// Anything else is dropped without telling the sender. The sender itself
    /// may already be gone: whatever it queued before closing is still delivered.
    pub fn relay(
        &self,
        sender_id: ConnectionId,
        target_id: ConnectionId,
        room_id: &RoomId,
        kind: RelayKind,
        payload: Value,
        out: &mut Outbox,
    ) -> bool {
        let is_member = self
            .rooms
            .get(room_id)
            .is_some_and(|room| room.contains(&target_id));
        if !is_member {
            debug!(
                "Dropping {:?} from {} to {}: not a member of room {}",
                kind, sender_id, target_id, room_id
            );
            return false;
        }

        debug!(
            "Forwarding {:?} from {} to {} in room {}",
            kind, sender_id, target_id, room_id
        );
        out.push(target_id, ServerMessage::relayed(kind, sender_id, payload));
        true
    }

    pub fn room_stats(&self, room_id: &RoomId) -> RoomStats {
        RoomStats {
            member_count: self.rooms.get(room_id).map_or(0, Room::len),
        }
    }

    pub fn server_stats(&self) -> ServerStats {
        ServerStats {
            active_rooms: self.rooms.len(),
            total_participants: self.rooms.values().map(Room::len).sum(),
            connections: self.registry.len(),
        }
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }
}

fn room_joined(room_id: RoomId, result: JoinResult) -> ServerMessage {
    ServerMessage::RoomJoined {
        room_id,
        participant_count: result.participant_count,
        is_initiator: result.is_initiator,
    }
}
