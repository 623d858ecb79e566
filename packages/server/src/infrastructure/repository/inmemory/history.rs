//! InMemory History Repository 実装
//!
//! ドメイン層が定義する `HistoryRepository` trait の具体的な実装。
//! `HistoryBuffer` ドメインモデルをそのままストレージとして使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, HistoryBuffer, HistoryRepository};

/// インメモリ History Repository 実装
pub struct InMemoryHistoryRepository {
    buffer: Mutex<HistoryBuffer>,
    capacity: usize,
}

impl InMemoryHistoryRepository {
    /// 指定した容量の空の履歴を作成
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Mutex::new(HistoryBuffer::new(capacity)),
            capacity,
        }
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, message: ChatMessage) {
        self.buffer.lock().await.append(message);
    }

    async fn snapshot(&self) -> Vec<ChatMessage> {
        self.buffer.lock().await.snapshot()
    }

    async fn len(&self) -> usize {
        self.buffer.lock().await.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
