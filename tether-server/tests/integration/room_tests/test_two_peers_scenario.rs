use serde_json::json;
use tether_core::{RelayKind, ServerMessage};

use crate::integration::{create_test_service, init_tracing};
use crate::utils::{member_count, room, settle};

#[tokio::test]
async fn test_two_peers_scenario() {
    init_tracing();

    let (rooms, signaling) = create_test_service();
    let a = rooms.register().await.expect("register A");
    let b = rooms.register().await.expect("register B");

    rooms.join(a, room("R1")).await.unwrap();
    settle(&rooms).await.unwrap();
    assert_eq!(
        signaling.take_for(&a).await,
        vec![ServerMessage::RoomJoined {
            room_id: room("R1"),
            participant_count: 1,
            is_initiator: true,
        }]
    );

    rooms.join(b, room("R1")).await.unwrap();
    settle(&rooms).await.unwrap();
    assert_eq!(
        signaling.take_for(&b).await,
        vec![ServerMessage::RoomJoined {
            room_id: room("R1"),
            participant_count: 2,
            is_initiator: false,
        }]
    );
    assert_eq!(
        signaling.take_for(&a).await,
        vec![ServerMessage::UserJoined {
            user_id: b,
            participant_count: 2,
        }]
    );

    let sdp = json!({"type": "offer", "sdp": "X"});
    rooms
        .relay(a, b, room("R1"), RelayKind::Offer, sdp.clone())
        .await
        .unwrap();
    settle(&rooms).await.unwrap();
    assert_eq!(
        signaling.take_for(&b).await,
        vec![ServerMessage::WebrtcOffer {
            from_id: a,
            offer: sdp,
        }]
    );

    rooms.disconnect(b);
    settle(&rooms).await.unwrap();
    assert_eq!(
        signaling.take_for(&a).await,
        vec![ServerMessage::UserLeft {
            user_id: b,
            participant_count: 1,
        }]
    );
    assert_eq!(member_count(&rooms, "R1").await.unwrap(), 1);

    rooms.leave(a, room("R1")).await.unwrap();
    let stats = settle(&rooms).await.unwrap();
    assert_eq!(stats.active_rooms, 0);
    assert_eq!(stats.total_participants, 0);
    assert_eq!(member_count(&rooms, "R1").await.unwrap(), 0);
    assert_eq!(signaling.total().await, 0);
}
