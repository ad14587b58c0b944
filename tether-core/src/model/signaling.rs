use crate::model::connection::ConnectionId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw inbound frame as it arrives from the browser.
///
/// Every field is optional here so that a frame with a missing field can be
/// reported back to the client by name instead of as a generic decode error.
/// Negotiation payloads stay opaque `Value`s and are never inspected.
#[derive(Debug, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientFrame {
    JoinRoom {
        room_id: Option<String>,
    },
    LeaveRoom {
        room_id: Option<String>,
    },
    WebrtcOffer {
        room_id: Option<String>,
        target_id: Option<String>,
        offer: Option<Value>,
    },
    WebrtcAnswer {
        room_id: Option<String>,
        target_id: Option<String>,
        answer: Option<Value>,
    },
    WebrtcIceCandidate {
        room_id: Option<String>,
        target_id: Option<String>,
        candidate: Option<Value>,
    },
}

/// Kind of negotiation payload being relayed between two peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    Offer,
    Answer,
    IceCandidate,
}

impl RelayKind {
    /// Name of the field carrying the payload on the wire.
    pub fn payload_field(self) -> &'static str {
        match self {
            RelayKind::Offer => "offer",
            RelayKind::Answer => "answer",
            RelayKind::IceCandidate => "candidate",
        }
    }
}

/// Events pushed from the server to a single connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    Welcome {
        connection_id: ConnectionId,
    },
    RoomJoined {
        room_id: RoomId,
        participant_count: usize,
        is_initiator: bool,
    },
    UserJoined {
        user_id: ConnectionId,
        participant_count: usize,
    },
    UserLeft {
        user_id: ConnectionId,
        participant_count: usize,
    },
    WebrtcOffer {
        from_id: ConnectionId,
        offer: Value,
    },
    WebrtcAnswer {
        from_id: ConnectionId,
        answer: Value,
    },
    WebrtcIceCandidate {
        from_id: ConnectionId,
        candidate: Value,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn relayed(kind: RelayKind, from_id: ConnectionId, payload: Value) -> Self {
        match kind {
            RelayKind::Offer => ServerMessage::WebrtcOffer {
                from_id,
                offer: payload,
            },
            RelayKind::Answer => ServerMessage::WebrtcAnswer {
                from_id,
                answer: payload,
            },
            RelayKind::IceCandidate => ServerMessage::WebrtcIceCandidate {
                from_id,
                candidate: payload,
            },
        }
    }
}
