use crate::room::{RoomStats, ServerStats};
use serde_json::Value;
use tether_core::{ConnectionId, RelayKind, RoomId};
use tokio::sync::oneshot;

/// Команды, поступающие в сервис комнат от WebSocket-соединений и HTTP-обработчиков.
///
/// Разрыв соединения сюда не входит: он идёт по отдельному приоритетному каналу,
/// см. [`crate::RoomHandle::disconnect`].
#[derive(Debug)]
pub enum RoomCommand {
    /// Новое транспортное соединение: выделить ему идентификатор.
    Register { reply: oneshot::Sender<ConnectionId> },

    /// Войти в комнату (создаётся при первом входе).
    Join {
        conn_id: ConnectionId,
        room_id: RoomId,
    },

    /// Явный выход из комнаты.
    Leave {
        conn_id: ConnectionId,
        room_id: RoomId,
    },

    /// SDP offer/answer или ICE кандидат для конкретного участника комнаты.
    Relay {
        sender_id: ConnectionId,
        target_id: ConnectionId,
        room_id: RoomId,
        kind: RelayKind,
        payload: Value,
    },

    /// Число участников одной комнаты.
    RoomStats {
        room_id: RoomId,
        reply: oneshot::Sender<RoomStats>,
    },

    /// Сводка по всем комнатам для health-check.
    ServerStats { reply: oneshot::Sender<ServerStats> },
}
