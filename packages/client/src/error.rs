//! Error types for the CLI client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not connect
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was lost
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// An input line could not be turned into a message
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Local I/O failure (e.g. reading an image file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame could not be serialized
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
