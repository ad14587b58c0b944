use std::collections::HashMap;
use tether_core::{ConnectionId, RoomId};
use tracing::debug;

/// Учёт живых транспортных сессий и комнаты, в которой находится каждая из них.
///
/// Реестр хранит только сторону `connection -> room`. Членство в комнатах
/// ведёт [`crate::RoomManager`], который и является единственным владельцем реестра.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Option<RoomId>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> ConnectionId {
        let mut id = ConnectionId::new();
        while self.connections.contains_key(&id) {
            id = ConnectionId::new();
        }
        self.connections.insert(id, None);
        debug!("Registered connection {}", id);
        id
    }

    /// Returns `false` if the id was not registered.
    pub fn unregister(&mut self, id: &ConnectionId) -> bool {
        let removed = self.connections.remove(id).is_some();
        if removed {
            debug!("Unregistered connection {}", id);
        }
        removed
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn current_room(&self, id: &ConnectionId) -> Option<&RoomId> {
        self.connections.get(id).and_then(Option::as_ref)
    }

    pub(crate) fn set_room(&mut self, id: &ConnectionId, room: Option<RoomId>) {
        if let Some(slot) = self.connections.get_mut(id) {
            *slot = room;
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConnectionId, Option<&RoomId>)> {
        self.connections.iter().map(|(id, room)| (id, room.as_ref()))
    }
}
