/// Error taxonomy of the shipment domain. The gateway maps these onto
/// HTTP status codes; database failures stay opaque to callers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("shipment not found")]
    NotFound,

    #[error("shipment is already delivered and locked against further updates")]
    InvalidTransition,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
