//! Error types for calgen.

use thiserror::Error;

/// Errors that can occur in calgen operations.
#[derive(Error, Debug)]
pub enum CalGenError {
    #[error("Invalid parameters: {0}")]
    Validation(String),

    #[error("Authentication expired: {0}")]
    AuthExpired(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("External service error: {0}")]
    External(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification used by the orchestrators to decide whether a
/// failed item aborts the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthExpired,
    NotFound,
    Other,
}

impl CalGenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalGenError::AuthExpired(_) => ErrorKind::AuthExpired,
            CalGenError::CalendarNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CalGenError::Validation(msg.into())
    }
}

/// Result type alias for calgen operations.
pub type CalGenResult<T> = Result<T, CalGenError>;
