//! MessagePusher trait 定義
//!
//! 接続ごとの送信キューへのインターフェース。レジストリはこの trait に依存し、
//! WebSocket などの具体的な実装には依存しない。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ConnectionId};

/// Outbound queue of a single connection, drained by its writer task
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivery of serialized frames to registered connections.
///
/// Implementations must not suspend on a slow consumer: the registry calls
/// these methods while holding its critical section.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the outbound queue of a connection.
    ///
    /// Returns `false` if the id was already registered (the existing queue
    /// is kept).
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) -> bool;

    /// Forget a connection. Returns whether it was registered.
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    /// Push a frame to one connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Push a frame to every registered connection.
    ///
    /// Connections whose queue is closed are unregistered and returned; the
    /// remaining connections still receive the frame.
    async fn broadcast(&self, content: &str) -> Vec<ConnectionId>;

    /// Number of registered connections
    async fn count_clients(&self) -> usize;
}
