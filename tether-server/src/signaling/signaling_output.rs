use async_trait::async_trait;
use tether_core::{ConnectionId, ServerMessage};

/// Трейт, который должна реализовать внешняя система (WebSocket сервер),
/// чтобы сервис комнат мог доставлять события конкретным соединениям.
///
/// Реализация не должна ждать сетевого ввода-вывода: сервис комнат вызывает её
/// последовательно для всех событий одной мутации.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Отправить событие одному соединению.
    async fn send_message(&self, conn_id: ConnectionId, msg: ServerMessage);
}
