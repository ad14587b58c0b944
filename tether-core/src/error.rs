use thiserror::Error;

/// Ошибки разбора входящих сигнальных сообщений.
///
/// Все варианты локальны для отправившего соединения: сервер отвечает
/// событием `error` и не меняет состояние комнат.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid signaling frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("binary frames are not supported")]
    UnsupportedFrame,
}
