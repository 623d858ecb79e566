//! Value objects.

use std::fmt;

use uuid::Uuid;

/// Server-side identity of one physical connection.
///
/// Generated on successful handshake and never reused: a reconnecting client
/// gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Factory for new connection ids (UUID v4)
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4())
    }
}
