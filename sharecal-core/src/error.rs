//! Error types for sharecal.

use thiserror::Error;

/// Errors that can occur in sharecal operations.
#[derive(Error, Debug)]
pub enum ShareCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid shared snapshot: {0}")]
    Snapshot(String),

    #[error("Invalid form input: {0}")]
    InvalidForm(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Could not open mail client: {0}")]
    MailClient(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),
}

/// Result type alias for sharecal operations.
pub type ShareCalResult<T> = Result<T, ShareCalError>;
