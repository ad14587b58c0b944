use crate::diagnostics::{health_handler, index_handler, room_stats_handler};
use crate::room::{RoomHandle, RoomService};
use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub struct AppState {
    pub signaling: SignalingService,
    pub rooms: RoomHandle,
}

impl AppState {
    /// Spawns the room service on the current runtime.
    pub fn new(command_buffer: usize) -> Arc<Self> {
        let signaling = SignalingService::new();
        let rooms = RoomService::spawn(command_buffer, Arc::new(signaling.clone()));

        Arc::new(Self { signaling, rooms })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/rooms/{room_id}", get(room_stats_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}
