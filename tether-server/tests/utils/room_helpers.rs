use anyhow::{Context, Result};
use tether_core::{ConnectionId, RoomId};
use tether_server::{RoomHandle, ServerStats};

pub fn room(id: &str) -> RoomId {
    RoomId::new(id).expect("room id must not be empty")
}

/// Waits until every command queued before this call has been applied and
/// its events delivered. The room service handles commands strictly in order.
pub async fn settle(rooms: &RoomHandle) -> Result<ServerStats> {
    rooms
        .server_stats()
        .await
        .context("Room service stopped while settling")
}

pub async fn member_count(rooms: &RoomHandle, room_id: &str) -> Result<usize> {
    let stats = rooms
        .room_stats(room(room_id))
        .await
        .context("Failed to query room stats")?;
    Ok(stats.member_count)
}

pub async fn register_many(rooms: &RoomHandle, count: usize) -> Result<Vec<ConnectionId>> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        ids.push(rooms.register().await.context("Failed to register")?);
    }
    Ok(ids)
}
