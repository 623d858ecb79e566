//! Domain logic for client-side operations.
//!
//! Pure functions and state that do not touch the network or the terminal.

use std::collections::{HashMap, VecDeque};

use hearth_server::domain::ChatMessage;

use crate::error::ClientError;

/// Number of received messages remembered for `/reply`
const SEEN_MESSAGES_LIMIT: usize = 500;

/// Check if the client should attempt to reconnect.
///
/// Only lost or refused connections are retried, and only while attempts
/// remain.
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    matches!(
        error,
        ClientError::ConnectionError(_) | ClientError::ConnectionLost(_)
    ) && current_attempt < max_attempts
}

/// Number of consecutive failed attempts after a session ended with `error`.
///
/// A session that was connected and then lost starts a fresh count, so
/// unrelated drops over a long run never add up.
pub fn failed_attempts_after(error: &ClientError, previous: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        _ => previous + 1,
    }
}

/// Recently received messages, looked up by id when composing a reply.
#[derive(Debug, Default)]
pub struct SeenMessages {
    by_id: HashMap<String, ChatMessage>,
    order: VecDeque<String>,
}

impl SeenMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a received message. A message seen again (e.g. in a history
    /// replay after reconnecting) replaces the earlier copy.
    pub fn record(&mut self, message: ChatMessage) {
        let id = message.id.clone();
        if self.by_id.insert(id.clone(), message).is_none() {
            self.order.push_back(id);
            if self.order.len() > SEEN_MESSAGES_LIMIT
                && let Some(oldest) = self.order.pop_front()
            {
                self.by_id.remove(&oldest);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ChatMessage> {
        self.by_id.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_server::domain::MessageKind;

    fn message(id: &str, content: &str) -> ChatMessage {
        ChatMessage::new(id, "alice", "2024-01-01T00:00:00Z", MessageKind::Text, content)
    }

    #[test]
    fn test_should_attempt_reconnect_on_connection_error() {
        // テスト項目: 接続エラーで試行回数が残っていれば再接続する
        // given (前提条件):
        let error = ClientError::ConnectionError("reset".to_string());

        // then (期待する結果):
        assert!(should_attempt_reconnect(&error, 0, 5));
        assert!(should_attempt_reconnect(&error, 4, 5));
        assert!(!should_attempt_reconnect(&error, 5, 5));
    }

    #[test]
    fn test_should_attempt_reconnect_on_lost_connection() {
        // テスト項目: 確立済みの接続が失われた場合も再接続する
        // given (前提条件):
        let error = ClientError::ConnectionLost("server went away".to_string());

        // then (期待する結果):
        assert!(should_attempt_reconnect(&error, 1, 5));
    }

    #[test]
    fn test_failed_attempts_reset_after_connected_session() {
        // テスト項目: 接続に成功したセッションが切断された後は試行回数が 1 から数え直される
        // given (前提条件):
        let refused = ClientError::ConnectionError("refused".to_string());
        let lost = ClientError::ConnectionLost("server went away".to_string());

        // when (操作):
        let mut attempts = 0;
        for _ in 0..4 {
            attempts = failed_attempts_after(&refused, attempts);
        }
        let after_refusals = attempts;
        attempts = failed_attempts_after(&lost, attempts);

        // then (期待する結果):
        assert_eq!(after_refusals, 4);
        assert_eq!(attempts, 1);
        assert!(should_attempt_reconnect(&lost, attempts, 5));
    }

    #[test]
    fn test_repeated_drops_never_exhaust_attempts() {
        // テスト項目: 接続後の切断が何度繰り返されても再接続の上限に達しない
        // given (前提条件):
        let lost = ClientError::ConnectionLost("server went away".to_string());

        // when (操作):
        let mut attempts = 0;
        for _ in 0..10 {
            attempts = failed_attempts_after(&lost, attempts);
        }

        // then (期待する結果):
        assert!(should_attempt_reconnect(&lost, attempts, 5));
    }

    #[test]
    fn test_should_not_reconnect_on_other_errors() {
        // テスト項目: 接続エラー以外では再接続しない
        // given (前提条件):
        let error = ClientError::InvalidCommand("/nope".to_string());

        // then (期待する結果):
        assert!(!should_attempt_reconnect(&error, 0, 5));
    }

    #[test]
    fn test_seen_messages_lookup_and_replace() {
        // テスト項目: 受信したメッセージを ID で参照でき、同じ ID は上書きされる
        // given (前提条件):
        let mut seen = SeenMessages::new();

        // when (操作):
        seen.record(message("1", "first"));
        seen.record(message("1", "again"));

        // then (期待する結果):
        assert_eq!(seen.get("1").map(|m| m.content.as_str()), Some("again"));
        assert!(seen.get("2").is_none());
    }

    #[test]
    fn test_seen_messages_forgets_oldest_past_limit() {
        // テスト項目: 上限を超えると最も古いメッセージが忘れられる
        // given (前提条件):
        let mut seen = SeenMessages::new();

        // when (操作):
        for i in 0..=SEEN_MESSAGES_LIMIT {
            seen.record(message(&i.to_string(), "x"));
        }

        // then (期待する結果):
        assert_eq!(seen.by_id.len(), SEEN_MESSAGES_LIMIT);
        assert!(seen.get("0").is_none());
        assert!(seen.get(&SEEN_MESSAGES_LIMIT.to_string()).is_some());
    }
}
