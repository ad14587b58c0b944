use crate::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tether_core::RoomId;
use tracing::error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub message: &'static str,
    pub active_rooms: usize,
    pub total_participants: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub message: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub active_rooms: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomReport {
    pub room_id: RoomId,
    pub member_count: usize,
}

pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthReport>, StatusCode> {
    let stats = state.rooms.server_stats().await.map_err(unavailable)?;

    Ok(Json(HealthReport {
        status: "healthy",
        message: "WebRTC Signaling Server is running",
        active_rooms: stats.active_rooms,
        total_participants: stats.total_participants,
    }))
}

pub async fn index_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ServiceInfo>, StatusCode> {
    let stats = state.rooms.server_stats().await.map_err(unavailable)?;

    let endpoints = BTreeMap::from([
        ("/health", "GET - Health check"),
        ("/rooms/{room_id}", "GET - Room member count"),
        ("/ws", "WebSocket - Real-time signaling"),
    ]);

    Ok(Json(ServiceInfo {
        message: "WebRTC Signaling Server",
        endpoints,
        active_rooms: stats.active_rooms,
    }))
}

pub async fn room_stats_handler(
    Path(room_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomReport>, StatusCode> {
    let room_id = RoomId::new(room_id).ok_or(StatusCode::BAD_REQUEST)?;
    let stats = state
        .rooms
        .room_stats(room_id.clone())
        .await
        .map_err(unavailable)?;

    Ok(Json(RoomReport {
        room_id,
        member_count: stats.member_count,
    }))
}

fn unavailable(e: crate::ServiceError) -> StatusCode {
    error!("Diagnostics query failed: {}", e);
    StatusCode::SERVICE_UNAVAILABLE
}
