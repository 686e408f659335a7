/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Invalid member: {0}")]
    InvalidMember(String),

    #[error("Session already resolved")]
    SessionClosed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
