//! Broadcast registry: admission with history replay, removal and fan-out.
//!
//! Every mutating operation runs inside one critical section (`gate`), so a
//! full append-and-broadcast cycle never overlaps another one or an admission.
//! This yields a single total order of frames equal to server arrival order,
//! and guarantees that a newly admitted connection sees its history replay
//! before any live broadcast.
//!
//! Delivery goes through per-connection unbounded queues, so holding the gate
//! never waits on a slow socket.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ChatMessage, ConnectionId, HistoryRepository, MessagePusher, PusherChannel},
    infrastructure::dto::websocket::encode_frame,
};

use super::error::{ConnectError, SendMessageError};

/// Outcome of one fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Members that had the frame queued
    pub delivered: usize,
    /// Members whose queue was closed; they have been removed
    pub dropped: Vec<ConnectionId>,
}

/// The set of admitted connections plus the shared message history
pub struct BroadcastRegistry {
    /// Repository（履歴ストアの抽象化）
    repository: Arc<dyn HistoryRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    gate: Mutex<()>,
}

impl BroadcastRegistry {
    pub fn new(
        repository: Arc<dyn HistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            gate: Mutex::new(()),
        }
    }

    /// Admit a connection and queue the history replay to it.
    ///
    /// The connection becomes a member and receives every held message,
    /// oldest first, one frame per message. Because the replay is queued
    /// while the gate is held, no broadcast can be queued ahead of it.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - number of replayed frames
    /// * `Err(ConnectError)` - the id is already a member, or the replay could
    ///   not be queued (the connection is not left admitted)
    pub async fn admit(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<usize, ConnectError> {
        let _gate = self.gate.lock().await;

        if !self
            .message_pusher
            .register_client(connection_id, sender)
            .await
        {
            return Err(ConnectError::AlreadyAdmitted(connection_id));
        }

        let history = self.repository.snapshot().await;
        if let Err(e) = self.replay(&connection_id, &history).await {
            self.message_pusher.unregister_client(&connection_id).await;
            return Err(e);
        }

        tracing::info!(
            "Connection '{}' admitted, replayed {} message(s)",
            connection_id,
            history.len()
        );
        Ok(history.len())
    }

    async fn replay(
        &self,
        connection_id: &ConnectionId,
        history: &[ChatMessage],
    ) -> Result<(), ConnectError> {
        for message in history {
            let frame = encode_frame(message)?;
            self.message_pusher.push_to(connection_id, &frame).await?;
        }
        Ok(())
    }

    /// Remove a connection. Removing an unknown or already removed
    /// connection is a no-op.
    ///
    /// Returns whether the connection was a member.
    pub async fn remove(&self, connection_id: &ConnectionId) -> bool {
        let _gate = self.gate.lock().await;
        let removed = self.message_pusher.unregister_client(connection_id).await;
        if removed {
            tracing::info!("Connection '{}' removed from registry", connection_id);
        }
        removed
    }

    /// Append a message to history and fan it out to every member,
    /// including the one it came from.
    ///
    /// Members whose queue is closed are removed; the others still receive
    /// the frame.
    pub async fn broadcast(
        &self,
        message: ChatMessage,
    ) -> Result<BroadcastReport, SendMessageError> {
        let frame = encode_frame(&message)?;

        let _gate = self.gate.lock().await;
        self.repository.append(message).await;
        let dropped = self.message_pusher.broadcast(&frame).await;
        let delivered = self.message_pusher.count_clients().await;

        for connection_id in &dropped {
            tracing::info!(
                "Connection '{}' dropped during broadcast and removed",
                connection_id
            );
        }

        Ok(BroadcastReport { delivered, dropped })
    }

    /// Number of admitted connections
    pub async fn member_count(&self) -> usize {
        self.message_pusher.count_clients().await
    }

    /// Number of messages currently held in history
    pub async fn history_len(&self) -> usize {
        self.repository.len().await
    }

    pub fn history_capacity(&self) -> usize {
        self.repository.capacity()
    }
}
