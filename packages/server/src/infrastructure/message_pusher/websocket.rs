//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender`（送信キュー）を管理
//! - クライアントへのフレーム送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! ソケットは UI 層（`ui/handler/websocket.rs`）の writer タスクが所有します。
//! この実装はキューの送信側だけを保持するため、送信がブロックすることはありません。
//! キューが閉じている（writer タスクが終了している）接続は切断済みとみなします。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) -> bool {
        let mut clients = self.clients.lock().await;
        if clients.contains_key(&connection_id) {
            tracing::warn!("Connection '{}' is already registered", connection_id);
            return false;
        }
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        true
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let removed = self.clients.lock().await.remove(connection_id).is_some();
        if removed {
            tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
        }
        removed
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;
        let sender = clients
            .get(connection_id)
            .ok_or(MessagePushError::ConnectionNotFound(*connection_id))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    async fn broadcast(&self, content: &str) -> Vec<ConnectionId> {
        let mut clients = self.clients.lock().await;

        // ブロードキャストでは一部の送信失敗を許容し、失敗した接続は登録解除する
        let mut dropped = Vec::new();
        for (connection_id, sender) in clients.iter() {
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!("Failed to push message to connection '{}': {}", connection_id, e);
                dropped.push(*connection_id);
            }
        }
        for connection_id in &dropped {
            clients.remove(connection_id);
        }

        tracing::debug!(
            "Broadcasted message to {} connection(s), dropped {}",
            clients.len(),
            dropped.len()
        );
        dropped
    }

    async fn count_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionIdFactory;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register / unregister の冪等性
    // - push_to: 特定の接続への送信
    // - broadcast: 全接続への送信と、閉じたキューの登録解除
    // ========================================

    #[tokio::test]
    async fn test_register_rejects_duplicate_id() {
        // テスト項目: 同じ ConnectionId の二重登録は拒否され、既存のキューが残る
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let id = ConnectionIdFactory::generate();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let first = pusher.register_client(id, tx1).await;
        let second = pusher.register_client(id, tx2).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(pusher.count_clients().await, 1);
        pusher.push_to(&id, "hello").await.unwrap();
        assert_eq!(rx1.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 登録解除を二回行っても二回目は何もしない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let id = ConnectionIdFactory::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_client(id, tx).await;

        // when (操作):
        let first = pusher.unregister_client(&id).await;
        let second = pusher.unregister_client(&id).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(pusher.count_clients().await, 0);
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection() {
        // テスト項目: 存在しない接続への送信は ConnectionNotFound を返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let id = ConnectionIdFactory::generate();

        // when (操作):
        let result = pusher.push_to(&id, "hello").await;

        // then (期待する結果):
        assert_eq!(result, Err(MessagePushError::ConnectionNotFound(id)));
    }

    #[tokio::test]
    async fn test_push_to_closed_queue_fails() {
        // テスト項目: キューが閉じている接続への送信は PushFailed を返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let id = ConnectionIdFactory::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register_client(id, tx).await;
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&id, "hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_connection() {
        // テスト項目: 全ての接続にメッセージがブロードキャストされる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(ConnectionIdFactory::generate(), tx1).await;
        pusher.register_client(ConnectionIdFactory::generate(), tx2).await;

        // when (操作):
        let dropped = pusher.broadcast("Broadcast message").await;

        // then (期待する結果):
        assert!(dropped.is_empty());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_drops_closed_queues_and_continues() {
        // テスト項目: キューが閉じた接続は登録解除され、残りの接続には配信が続く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let alive = ConnectionIdFactory::generate();
        let dead = ConnectionIdFactory::generate();
        let (tx_alive, mut rx_alive) = mpsc::unbounded_channel();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        pusher.register_client(alive, tx_alive).await;
        pusher.register_client(dead, tx_dead).await;
        drop(rx_dead);

        // when (操作):
        let dropped = pusher.broadcast("still here").await;

        // then (期待する結果):
        assert_eq!(dropped, vec![dead]);
        assert_eq!(rx_alive.recv().await, Some("still here".to_string()));
        assert_eq!(pusher.count_clients().await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_with_no_connections() {
        // テスト項目: 接続がなくてもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let dropped = pusher.broadcast("Message").await;

        // then (期待する結果):
        assert!(dropped.is_empty());
    }
}
