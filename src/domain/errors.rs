use thiserror::Error;

/// Failures surfaced by checkout and clinical operations. `InvalidInput`
/// carries the user-facing message and maps to a 400 at the HTTP layer;
/// everything else becomes a 500 with the text as the diagnostic detail.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("no order with id {0}")]
    OrderNotFound(String),
    #[error("database error: {0}")]
    Persistence(String),
    #[error("payment processor error: {0}")]
    Payment(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failures of the confirmation-email path. These never cross into an HTTP
/// response: the outbox worker logs them and schedules a retry.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid recipient address: {0}")]
    Recipient(String),
    #[error("failed to build message: {0}")]
    Message(String),
    #[error("mail transport error: {0}")]
    Transport(String),
}
