use crate::error::ServiceError;
use crate::room::RoomHandle;
use serde_json::Value;
use tether_core::{ClientFrame, ConnectionId, ProtocolError, RelayKind, RoomId, ServerMessage};
use tracing::{debug, warn};

/// A validated inbound signaling message.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Join {
        room_id: RoomId,
    },
    Leave {
        room_id: RoomId,
    },
    Relay {
        room_id: RoomId,
        target_id: ConnectionId,
        kind: RelayKind,
        payload: Value,
    },
}

/// Decodes and validates one text frame.
///
/// `Ok(None)` means the frame is well-formed but addresses a target id that can
/// never belong to a live connection; such frames are dropped like any other
/// relay to an unknown target.
pub fn decode(text: &str) -> Result<Option<Signal>, ProtocolError> {
    let frame: ClientFrame = serde_json::from_str(text)?;

    let signal = match frame {
        ClientFrame::JoinRoom { room_id } => Signal::Join {
            room_id: require_room(room_id)?,
        },
        ClientFrame::LeaveRoom { room_id } => Signal::Leave {
            room_id: require_room(room_id)?,
        },
        ClientFrame::WebrtcOffer {
            room_id,
            target_id,
            offer,
        } => return relay(RelayKind::Offer, room_id, target_id, offer),
        ClientFrame::WebrtcAnswer {
            room_id,
            target_id,
            answer,
        } => return relay(RelayKind::Answer, room_id, target_id, answer),
        ClientFrame::WebrtcIceCandidate {
            room_id,
            target_id,
            candidate,
        } => return relay(RelayKind::IceCandidate, room_id, target_id, candidate),
    };

    Ok(Some(signal))
}

fn require_room(room_id: Option<String>) -> Result<RoomId, ProtocolError> {
    let room_id = room_id.ok_or(ProtocolError::MissingField("roomId"))?;
    RoomId::new(room_id).ok_or(ProtocolError::EmptyRoomId)
}

fn relay(
    kind: RelayKind,
    room_id: Option<String>,
    target_id: Option<String>,
    payload: Option<Value>,
) -> Result<Option<Signal>, ProtocolError> {
    let room_id = require_room(room_id)?;
    let target_id = target_id.ok_or(ProtocolError::MissingField("targetId"))?;
    let payload = payload
        .filter(|p| !p.is_null())
        .ok_or(ProtocolError::MissingField(kind.payload_field()))?;

    let Ok(target_id) = target_id.parse::<ConnectionId>() else {
        debug!("Dropping {:?} to unknown target '{}'", kind, target_id);
        return Ok(None);
    };

    Ok(Some(Signal::Relay {
        room_id,
        target_id,
        kind,
        payload,
    }))
}

/// Hands a validated signal to the room service on behalf of `conn_id`.
pub async fn dispatch(
    rooms: &RoomHandle,
    conn_id: ConnectionId,
    signal: Signal,
) -> Result<(), ServiceError> {
    match signal {
        Signal::Join { room_id } => rooms.join(conn_id, room_id).await,
        Signal::Leave { room_id } => rooms.leave(conn_id, room_id).await,
        Signal::Relay {
            room_id,
            target_id,
            kind,
            payload,
        } => rooms.relay(conn_id, target_id, room_id, kind, payload).await,
    }
}

/// Routes one inbound text frame. A malformed frame yields the `error` event
/// to send back to its sender; nothing is forwarded to the room service.
pub async fn handle_text(
    rooms: &RoomHandle,
    conn_id: ConnectionId,
    text: &str,
) -> Result<Option<ServerMessage>, ServiceError> {
    match decode(text) {
        Ok(Some(signal)) => {
            dispatch(rooms, conn_id, signal).await?;
            Ok(None)
        }
        Ok(None) => Ok(None),
        Err(e) => {
            warn!("Invalid signaling frame from {}: {}", conn_id, e);
            Ok(Some(reject(e)))
        }
    }
}

pub fn reject(error: ProtocolError) -> ServerMessage {
    ServerMessage::Error {
        message: error.to_string(),
    }
}
