//! Conversion logic between DTOs and domain entities.

use serde_json::Value;

use crate::domain::entity;
use crate::infrastructure::dto::websocket as dto;

const THUMBNAIL_KEY: &str = "thumbnail";
const REPLY_TO_KEY: &str = "replyTo";

/// An explicit `null` becomes an extension member so it survives the trip
/// through the domain model.
fn null_into_extensions<T>(
    member: Option<Option<T>>,
    key: &str,
    extensions: &mut entity::Extensions,
) -> Option<T> {
    match member {
        Some(Some(value)) => Some(value),
        Some(None) => {
            extensions.insert(key.to_string(), Value::Null);
            None
        }
        None => None,
    }
}

/// Inverse of `null_into_extensions`: a null recorded under `key` is emitted
/// as the member itself, never alongside it.
fn null_from_extensions<T>(
    value: Option<T>,
    key: &str,
    extensions: &mut entity::Extensions,
) -> Option<Option<T>> {
    let recorded_null = extensions.get(key).is_some_and(Value::is_null);
    if recorded_null {
        extensions.remove(key);
    }
    match value {
        Some(value) => Some(Some(value)),
        None if recorded_null => Some(None),
        None => None,
    }
}

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::MessageType> for entity::MessageKind {
    fn from(dto: dto::MessageType) -> Self {
        match dto {
            dto::MessageType::Text => Self::Text,
            dto::MessageType::Image => Self::Image,
        }
    }
}

impl From<dto::ReplyTo> for entity::ReplySnapshot {
    fn from(dto: dto::ReplyTo) -> Self {
        let mut extensions = dto.extra;
        let thumbnail = null_into_extensions(dto.thumbnail, THUMBNAIL_KEY, &mut extensions);
        Self {
            id: dto.id,
            username: dto.username,
            content: dto.content,
            kind: dto.r#type.into(),
            thumbnail,
            extensions,
        }
    }
}

impl From<dto::ChatMessage> for entity::ChatMessage {
    fn from(dto: dto::ChatMessage) -> Self {
        let mut extensions = dto.extra;
        let reply_to = null_into_extensions(dto.reply_to, REPLY_TO_KEY, &mut extensions);
        Self {
            id: dto.id,
            username: dto.username,
            timestamp: dto.timestamp,
            kind: dto.r#type.into(),
            content: dto.content,
            reply_to: reply_to.map(Into::into),
            extensions,
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::MessageKind> for dto::MessageType {
    fn from(model: entity::MessageKind) -> Self {
        match model {
            entity::MessageKind::Text => Self::Text,
            entity::MessageKind::Image => Self::Image,
        }
    }
}

impl From<entity::ReplySnapshot> for dto::ReplyTo {
    fn from(model: entity::ReplySnapshot) -> Self {
        let mut extra = model.extensions;
        let thumbnail = null_from_extensions(model.thumbnail, THUMBNAIL_KEY, &mut extra);
        Self {
            id: model.id,
            username: model.username,
            content: model.content,
            r#type: model.kind.into(),
            thumbnail,
            extra,
        }
    }
}

impl From<entity::ChatMessage> for dto::ChatMessage {
    fn from(model: entity::ChatMessage) -> Self {
        let mut extra = model.extensions;
        let reply_to = null_from_extensions(
            model.reply_to.map(dto::ReplyTo::from),
            REPLY_TO_KEY,
            &mut extra,
        );
        Self {
            id: model.id,
            username: model.username,
            timestamp: model.timestamp,
            r#type: model.kind.into(),
            content: model.content,
            reply_to,
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_to_entity_keeps_reply_snapshot() {
        // テスト項目: DTO からエンティティへの変換でリプライスナップショットが保持される
        // given (前提条件):
        let dto = dto::ChatMessage {
            id: "2".to_string(),
            username: "bob".to_string(),
            timestamp: "2024-01-01T00:00:01Z".to_string(),
            r#type: dto::MessageType::Text,
            content: "me too".to_string(),
            reply_to: Some(Some(dto::ReplyTo {
                id: "1".to_string(),
                username: "alice".to_string(),
                content: "data:image/png;base64,AAAA".to_string(),
                r#type: dto::MessageType::Image,
                thumbnail: Some(Some("data:image/png;base64,AA".to_string())),
                extra: serde_json::Map::new(),
            })),
            extra: serde_json::Map::new(),
        };

        // when (操作):
        let message: entity::ChatMessage = dto.into();

        // then (期待する結果):
        assert_eq!(message.kind, entity::MessageKind::Text);
        let reply = message.reply_to.expect("reply snapshot should be kept");
        assert_eq!(reply.id, "1");
        assert_eq!(reply.kind, entity::MessageKind::Image);
        assert_eq!(reply.thumbnail.as_deref(), Some("data:image/png;base64,AA"));
    }

    #[test]
    fn test_entity_to_dto_maps_kind() {
        // テスト項目: エンティティから DTO への変換で種別が正しく対応付けられる
        // given (前提条件):
        let message = entity::ChatMessage::new(
            "9",
            "carol",
            "2024-01-01T00:00:00Z",
            entity::MessageKind::Image,
            "data:image/gif;base64,R0lG",
        );

        // when (操作):
        let frame: dto::ChatMessage = message.into();

        // then (期待する結果):
        assert_eq!(frame.r#type, dto::MessageType::Image);
        assert_eq!(frame.content, "data:image/gif;base64,R0lG");
        assert!(frame.reply_to.is_none());
    }

    #[test]
    fn test_explicit_null_thumbnail_survives_entity_round_trip() {
        // テスト項目: 明示的な null の thumbnail はエンティティを経由しても null として DTO に戻る
        // given (前提条件):
        let reply = dto::ReplyTo {
            id: "1".to_string(),
            username: "alice".to_string(),
            content: "hi".to_string(),
            r#type: dto::MessageType::Text,
            thumbnail: Some(None),
            extra: serde_json::Map::new(),
        };

        // when (操作):
        let snapshot: entity::ReplySnapshot = reply.clone().into();
        let back: dto::ReplyTo = snapshot.clone().into();

        // then (期待する結果):
        assert!(snapshot.thumbnail.is_none());
        assert_eq!(back, reply);
    }

    #[test]
    fn test_set_thumbnail_replaces_recorded_null() {
        // テスト項目: null が記録されていても値のある thumbnail が優先され、extra に null が残らない
        // given (前提条件):
        let mut snapshot: entity::ReplySnapshot = dto::ReplyTo {
            id: "1".to_string(),
            username: "alice".to_string(),
            content: "data:image/png;base64,AAAA".to_string(),
            r#type: dto::MessageType::Image,
            thumbnail: Some(None),
            extra: serde_json::Map::new(),
        }
        .into();

        // when (操作):
        snapshot.thumbnail = Some("data:image/png;base64,AA".to_string());
        let back: dto::ReplyTo = snapshot.into();

        // then (期待する結果):
        assert_eq!(back.thumbnail, Some(Some("data:image/png;base64,AA".to_string())));
        assert!(back.extra.is_empty());
    }
}
