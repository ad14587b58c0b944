use std::collections::HashSet;
use tether_core::{ConnectionId, RoomId};

/// A named rendezvous point and its current members.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    members: HashSet<ConnectionId>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            members: HashSet::new(),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn insert(&mut self, conn_id: ConnectionId) -> bool {
        self.members.insert(conn_id)
    }

    pub fn remove(&mut self, conn_id: &ConnectionId) -> bool {
        self.members.remove(conn_id)
    }

    pub fn contains(&self, conn_id: &ConnectionId) -> bool {
        self.members.contains(conn_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &ConnectionId> {
        self.members.iter()
    }

    /// Every member except `conn_id`.
    pub fn others<'a>(&'a self, conn_id: &'a ConnectionId) -> impl Iterator<Item = ConnectionId> + 'a {
        self.members.iter().filter(move |id| *id != conn_id).copied()
    }
}
