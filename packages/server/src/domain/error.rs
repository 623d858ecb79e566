//! Domain-level error types.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Failure to deliver a frame to a connection's outbound queue
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// The connection is not (or no longer) registered
    #[error("connection '{0}' not found")]
    ConnectionNotFound(ConnectionId),

    /// The connection's writer has gone away
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
