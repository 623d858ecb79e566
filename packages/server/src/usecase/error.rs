//! Error types for the use-case layer.

use thiserror::Error;

use crate::domain::{ConnectionId, MessagePushError};

/// Admission failure
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The connection id is already a member
    #[error("connection '{0}' is already admitted")]
    AlreadyAdmitted(ConnectionId),

    /// History replay could not be queued to the new connection
    #[error("history replay failed: {0}")]
    ReplayFailed(#[from] MessagePushError),

    /// A history entry could not be serialized
    #[error("failed to encode history entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Broadcast failure
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// The message could not be serialized into a frame
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
