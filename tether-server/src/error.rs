use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("room service is not running")]
    Unavailable,
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for ServiceError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        ServiceError::Unavailable
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for ServiceError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        ServiceError::Unavailable
    }
}
