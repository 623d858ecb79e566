//! WebSocket frame DTOs.
//!
//! Every frame, in both directions, is a UTF-8 JSON object of this shape:
//!
//! ```text
//! { "id": string, "username": string, "timestamp": string,
//!   "type": "text"|"image", "content": string,
//!   "replyTo"?: { "id", "username", "content", "type", "thumbnail"? } }
//! ```
//!
//! Members outside this shape are kept in `extra` and written back out
//! unchanged. The optional members distinguish an explicit `null` from an
//! absent key (`Some(None)` vs `None`) so that either form is echoed as
//! received.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entity;

/// Chat content type as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
}

/// Reply snapshot as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyTo {
    pub id: String,
    pub username: String,
    pub content: String,
    pub r#type: MessageType,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Chat message frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub username: String,
    pub timestamp: String,
    pub r#type: MessageType,
    pub content: String,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reply_to: Option<Option<ReplyTo>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Inbound frame could not be turned into a chat message
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, or JSON missing a required member / with a bad `type`
    #[error("invalid chat frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),
}

/// Decode one inbound text frame into a domain message.
pub fn decode_frame(text: &str) -> Result<entity::ChatMessage, DecodeError> {
    let dto: ChatMessage = serde_json::from_str(text)?;
    Ok(dto.into())
}

/// Serialize a domain message into an outbound text frame.
pub fn encode_frame(message: &entity::ChatMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ChatMessage::from(message.clone()))
}
