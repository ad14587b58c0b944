use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use tether_server::{AppState, build_router};

use crate::integration::init_tracing;
use crate::utils::{room, settle};

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_reports_rooms_and_participants() {
    init_tracing();

    let state = AppState::new(16);
    let app = build_router(state.clone());

    let (status, body) = get_json(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "message": "WebRTC Signaling Server is running",
            "activeRooms": 0,
            "totalParticipants": 0
        })
    );

    let a = state.rooms.register().await.unwrap();
    let b = state.rooms.register().await.unwrap();
    let c = state.rooms.register().await.unwrap();
    state.rooms.join(a, room("R1")).await.unwrap();
    state.rooms.join(b, room("R1")).await.unwrap();
    state.rooms.join(c, room("R2")).await.unwrap();
    settle(&state.rooms).await.unwrap();

    let (_, body) = get_json(app.clone(), "/health").await;
    assert_eq!(body["activeRooms"], json!(2));
    assert_eq!(body["totalParticipants"], json!(3));

    let (status, body) = get_json(app.clone(), "/rooms/R1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"roomId": "R1", "memberCount": 2}));

    let (_, body) = get_json(app, "/").await;
    assert_eq!(body["activeRooms"], json!(2));
    assert!(body["endpoints"]["/ws"].is_string());
}
