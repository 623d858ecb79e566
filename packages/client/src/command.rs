//! Parsing of input lines and composition of outgoing messages.
//!
//! - plain text: a `text` message
//! - `/image <path>`: the file as a base64 data URI `image` message
//! - `/reply <id> <text>`: a `text` message quoting a previously seen message

use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use hearth_server::domain::{ChatMessage, MessageKind};
use hearth_shared::time::{Clock, to_rfc3339};
use uuid::Uuid;

use crate::{domain::SeenMessages, error::ClientError};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Image(PathBuf),
    Reply { id: String, text: String },
}

/// Parse one trimmed, non-empty input line.
pub fn parse_command(line: &str) -> Result<Command, ClientError> {
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Text(line.to_string()));
    };

    let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
    let args = args.trim();
    match name {
        "image" if !args.is_empty() => Ok(Command::Image(PathBuf::from(args))),
        "image" => Err(ClientError::InvalidCommand(
            "usage: /image <path>".to_string(),
        )),
        "reply" => match args.split_once(' ') {
            Some((id, text)) if !text.trim().is_empty() => Ok(Command::Reply {
                id: id.to_string(),
                text: text.trim().to_string(),
            }),
            _ => Err(ClientError::InvalidCommand(
                "usage: /reply <id> <text>".to_string(),
            )),
        },
        other => Err(ClientError::InvalidCommand(format!("unknown command '/{}'", other))),
    }
}

impl Command {
    /// Build the message to send for this command, stamped with `clock`.
    pub fn into_message(
        self,
        username: &str,
        seen: &SeenMessages,
        clock: &dyn Clock,
    ) -> Result<ChatMessage, ClientError> {
        let timestamp = to_rfc3339(clock.now());
        match self {
            Command::Text(text) => Ok(new_message(username, timestamp, MessageKind::Text, text)),
            Command::Image(path) => {
                let uri = image_data_uri(&path)?;
                Ok(new_message(username, timestamp, MessageKind::Image, uri))
            }
            Command::Reply { id, text } => {
                let target = seen.get(&id).ok_or_else(|| {
                    ClientError::InvalidCommand(format!("no message with id '{}'", id))
                })?;
                Ok(new_message(username, timestamp, MessageKind::Text, text)
                    .with_reply_to(target.snapshot_for_reply()))
            }
        }
    }
}

fn new_message(
    username: &str,
    timestamp: String,
    kind: MessageKind,
    content: String,
) -> ChatMessage {
    ChatMessage::new(Uuid::new_v4().to_string(), username, timestamp, kind, content)
}

/// Read an image file and encode it as a `data:` URI
fn image_data_uri(path: &Path) -> Result<String, ClientError> {
    let bytes = std::fs::read(path)?;
    Ok(format!(
        "data:{};base64,{}",
        mime_type(path),
        STANDARD.encode(bytes)
    ))
}

fn mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}
