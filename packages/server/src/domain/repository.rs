//! Repository trait 定義
//!
//! 履歴ストアへのインターフェース。具体的な実装は Infrastructure 層が提供する。

use async_trait::async_trait;

use super::entity::ChatMessage;

/// Storage of the bounded message history.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append a message, evicting the oldest one when full
    async fn append(&self, message: ChatMessage);

    /// All held messages, oldest first
    async fn snapshot(&self) -> Vec<ChatMessage>;

    /// Number of held messages
    async fn len(&self) -> usize;

    /// Maximum number of held messages
    fn capacity(&self) -> usize;
}
