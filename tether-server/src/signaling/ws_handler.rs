use crate::AppState;
use crate::signaling::{handle_text, reject};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tether_core::{ProtocolError, ServerMessage};
use tokio::sync::mpsc;
use tracing::{error, info};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let conn_id = match state.rooms.register().await {
        Ok(id) => id,
        Err(e) => {
            error!("Rejecting WebSocket connection: {}", e);
            return;
        }
    };
    info!("New WebSocket connection: {}", conn_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_connection(conn_id, tx);
    state.signaling.send_signal(
        conn_id,
        ServerMessage::Welcome {
            connection_id: conn_id,
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        match handle_text(&state.rooms, conn_id, text.as_str()).await {
                            Ok(Some(reply)) => state.signaling.send_signal(conn_id, reply),
                            Ok(None) => {}
                            Err(e) => {
                                error!("Room service died: {}", e);
                                break;
                            }
                        }
                    }
                    Message::Binary(_) => state
                        .signaling
                        .send_signal(conn_id, reject(ProtocolError::UnsupportedFrame)),
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.rooms.disconnect(conn_id);
    state.signaling.remove_connection(&conn_id);
    info!("WebSocket disconnected: {}", conn_id);
}
