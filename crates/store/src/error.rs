//! Error types for record stores.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by a [`RecordStore`](crate::RecordStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Request could not be sent or the connection failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The store answered with a non-success status.
    #[error("Store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The store answered with a body we could not read.
    #[error("Malformed store response: {0}")]
    Decode(String),

    /// Store configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
