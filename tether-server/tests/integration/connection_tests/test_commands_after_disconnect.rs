use serde_json::json;
use tether_core::{RelayKind, ServerMessage};

use crate::integration::{create_test_service, init_tracing};
use crate::utils::{member_count, room, settle};

#[tokio::test]
async fn test_join_from_closed_connection_is_ignored() {
    init_tracing();

    let (rooms, signaling) = create_test_service();
    let a = rooms.register().await.unwrap();
    let b = rooms.register().await.unwrap();
    rooms.join(b, room("R1")).await.unwrap();
    settle(&rooms).await.unwrap();
    signaling.clear().await;

    rooms.disconnect(a);
    settle(&rooms).await.unwrap();

    rooms.join(a, room("R1")).await.unwrap();
    rooms
        .relay(b, a, room("R1"), RelayKind::Offer, json!("to nobody"))
        .await
        .unwrap();
    let stats = settle(&rooms).await.unwrap();

    assert_eq!(stats.total_participants, 1);
    assert_eq!(stats.connections, 1);
    assert_eq!(signaling.total().await, 0);
}

#[tokio::test]
async fn test_disconnect_overtakes_queued_join() {
    init_tracing();

    let (rooms, _signaling) = create_test_service();
    let a = rooms.register().await.unwrap();
    let b = rooms.register().await.unwrap();
    rooms.join(b, room("R1")).await.unwrap();
    let before = settle(&rooms).await.unwrap();
    assert_eq!(before.connections, 2);

    rooms.join(a, room("R2")).await.unwrap();
    rooms.disconnect(a);
    let stats = settle(&rooms).await.unwrap();

    assert_eq!(stats.connections, 1);
    assert_eq!(stats.active_rooms, 1);
    assert_eq!(member_count(&rooms, "R2").await.unwrap(), 0);
    assert_eq!(member_count(&rooms, "R1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_queued_relay_survives_sender_disconnect() {
    init_tracing();

    let (rooms, signaling) = create_test_service();
    let a = rooms.register().await.unwrap();
    let b = rooms.register().await.unwrap();
    rooms.join(a, room("R1")).await.unwrap();
    rooms.join(b, room("R1")).await.unwrap();
    settle(&rooms).await.unwrap();
    signaling.clear().await;

    rooms
        .relay(a, b, room("R1"), RelayKind::IceCandidate, json!("last"))
        .await
        .unwrap();
    rooms.disconnect(a);
    settle(&rooms).await.unwrap();

    let to_b = signaling.messages_for(&b).await;
    assert!(
        to_b.contains(&ServerMessage::WebrtcIceCandidate {
            from_id: a,
            candidate: json!("last"),
        }),
        "queued candidate was not delivered: {to_b:?}"
    );
    assert!(to_b.contains(&ServerMessage::UserLeft {
        user_id: a,
        participant_count: 1,
    }));
    assert_eq!(to_b.len(), 2);
    assert_eq!(member_count(&rooms, "R1").await.unwrap(), 1);
}
