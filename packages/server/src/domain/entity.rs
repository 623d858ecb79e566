//! Domain entities.
//!
//! A `ChatMessage` is opaque payload as far as the relay is concerned: the
//! server stores and forwards it but never inspects `content`, re-derives
//! `timestamp` or validates `username`.

/// Members of an inbound frame the relay does not model itself.
///
/// They are carried through untouched so that a forwarded frame equals the
/// frame the sender produced. An optional member sent as an explicit `null`
/// is kept here as well.
pub type Extensions = serde_json::Map<String, serde_json::Value>;

/// Kind of chat content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Raw message body
    Text,
    /// Self-contained encoded image (e.g. a base64 data URI)
    Image,
}

/// Denormalized copy of the message being replied to.
///
/// This is a snapshot, not a link: it stays valid after the original message
/// has been evicted from history.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplySnapshot {
    pub id: String,
    pub username: String,
    pub content: String,
    pub kind: MessageKind,
    /// Precomputed thumbnail payload, only meaningful for image replies
    pub thumbnail: Option<String>,
    pub extensions: Extensions,
}

/// A unit of chat content received from a client
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Client-generated opaque identifier
    pub id: String,
    /// Self-reported, unvalidated sender name
    pub username: String,
    /// Client-generated ISO-8601 timestamp, never re-derived server-side
    pub timestamp: String,
    pub kind: MessageKind,
    pub content: String,
    pub reply_to: Option<ReplySnapshot>,
    pub extensions: Extensions,
}

impl ChatMessage {
    /// Create a message without reply snapshot or extension members.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        timestamp: impl Into<String>,
        kind: MessageKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            timestamp: timestamp.into(),
            kind,
            content: content.into(),
            reply_to: None,
            extensions: Extensions::new(),
        }
    }

    /// Attach a reply snapshot.
    pub fn with_reply_to(mut self, reply_to: ReplySnapshot) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Build a reply snapshot of this message.
    ///
    /// Image messages use their own content as the thumbnail; producing a
    /// smaller rendition is left to whoever displays it.
    pub fn snapshot_for_reply(&self) -> ReplySnapshot {
        ReplySnapshot {
            id: self.id.clone(),
            username: self.username.clone(),
            content: self.content.clone(),
            kind: self.kind,
            thumbnail: match self.kind {
                MessageKind::Image => Some(self.content.clone()),
                MessageKind::Text => None,
            },
            extensions: Extensions::new(),
        }
    }
}
