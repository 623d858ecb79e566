//! Bounded FIFO log of recent messages used to backfill new connections.

use std::collections::VecDeque;

use super::entity::ChatMessage;

/// Number of messages kept when no capacity is configured
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Fixed-capacity, append-only message log.
///
/// Invariant: `len() <= capacity()`. Entries are never mutated after
/// insertion; when full, appending evicts the oldest entry first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    capacity: usize,
    entries: VecDeque<ChatMessage>,
}

impl HistoryBuffer {
    /// Create an empty buffer holding at most `capacity` messages.
    ///
    /// A capacity of zero is allowed and keeps nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
        }
    }

    /// Append a message, evicting the oldest one if the buffer is full.
    pub fn append(&mut self, message: ChatMessage) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    /// Owned copy of every held message, oldest first.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::MessageKind;

    fn message(id: &str) -> ChatMessage {
        ChatMessage::new(id, "alice", "2024-01-01T00:00:00Z", MessageKind::Text, id)
    }

    fn ids(messages: &[ChatMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_new_buffer_is_empty() {
        // テスト項目: 作成直後のバッファは空である
        // given (前提条件):
        let buffer = HistoryBuffer::default();

        // then (期待する結果):
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), DEFAULT_HISTORY_CAPACITY);
        assert!(buffer.snapshot().is_empty());
    }

    #[test]
    fn test_append_below_capacity_keeps_all_in_order() {
        // テスト項目: 容量未満の追加ではすべてのメッセージが順序通り保持される
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(5);

        // when (操作):
        for id in ["m1", "m2", "m3"] {
            buffer.append(message(id));
        }

        // then (期待する結果):
        assert_eq!(ids(&buffer.snapshot()), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_append_over_capacity_evicts_oldest() {
        // テスト項目: 容量 2 で M1, M2, M3 を追加すると [M2, M3] が残る
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(2);

        // when (操作):
        buffer.append(message("m1"));
        buffer.append(message("m2"));
        buffer.append(message("m3"));

        // then (期待する結果):
        assert_eq!(buffer.len(), 2);
        assert_eq!(ids(&buffer.snapshot()), vec!["m2", "m3"]);
    }

    #[test]
    fn test_many_appends_keep_last_capacity_messages() {
        // テスト項目: N > C 回の追加後、最後の C 件が元の順序で残る
        // given (前提条件):
        let capacity = 100;
        let mut buffer = HistoryBuffer::new(capacity);

        // when (操作):
        for i in 0..250 {
            buffer.append(message(&i.to_string()));
        }

        // then (期待する結果):
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), capacity);
        let expected: Vec<String> = (150..250).map(|i| i.to_string()).collect();
        let actual: Vec<String> = snapshot.into_iter().map(|m| m.id).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_appends() {
        // テスト項目: 取得済みのスナップショットは後の追加の影響を受けない
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(2);
        buffer.append(message("m1"));
        buffer.append(message("m2"));
        let snapshot = buffer.snapshot();

        // when (操作):
        buffer.append(message("m3"));

        // then (期待する結果):
        assert_eq!(ids(&snapshot), vec!["m1", "m2"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        // テスト項目: 容量 0 のバッファは何も保持しない
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(0);

        // when (操作):
        buffer.append(message("m1"));

        // then (期待する結果):
        assert!(buffer.is_empty());
        assert!(buffer.snapshot().is_empty());
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        // テスト項目: 非常に大きな容量を指定してもバッファの作成時に確保されず、通常通り動作する
        // given (前提条件):
        let mut buffer = HistoryBuffer::new(usize::MAX);

        // when (操作):
        buffer.append(message("m1"));

        // then (期待する結果):
        assert_eq!(buffer.capacity(), usize::MAX);
        assert_eq!(ids(&buffer.snapshot()), vec!["m1"]);
    }
}
