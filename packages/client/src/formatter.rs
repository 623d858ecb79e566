//! Message formatting utilities for client display.

use hearth_server::domain::{ChatMessage, MessageKind, ReplySnapshot};

/// Maximum number of characters of a quoted reply shown
const QUOTE_PREVIEW_CHARS: usize = 40;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `message` - The received message
    /// * `time_label` - Display form of the message timestamp
    /// * `is_me` - Whether the message was sent under the current username
    pub fn format_chat_message(message: &ChatMessage, time_label: &str, is_me: bool) -> String {
        let mut output = String::from("\n");
        if let Some(reply) = &message.reply_to {
            output.push_str(&format!("  > {}\n", Self::format_quote(reply)));
        }
        let me_suffix = if is_me { " (me)" } else { "" };
        output.push_str(&format!(
            "[{}] {}{}: {}\n",
            time_label,
            message.username,
            me_suffix,
            Self::format_content(message.kind, &message.content)
        ));
        output.push_str(&format!("  id: {}\n", message.id));
        output
    }

    fn format_quote(reply: &ReplySnapshot) -> String {
        let preview = match reply.kind {
            MessageKind::Text => {
                let mut preview: String = reply.content.chars().take(QUOTE_PREVIEW_CHARS).collect();
                if reply.content.chars().count() > QUOTE_PREVIEW_CHARS {
                    preview.push_str("...");
                }
                preview
            }
            MessageKind::Image => "<image>".to_string(),
        };
        format!("{}: {}", reply.username, preview)
    }

    fn format_content(kind: MessageKind, content: &str) -> String {
        match kind {
            MessageKind::Text => content.to_string(),
            MessageKind::Image => format!("<image, {} bytes>", content.len()),
        }
    }

    /// Format a frame that could not be decoded as a chat message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format a binary frame notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n[binary] {} bytes\n", byte_count)
    }

    /// Format a local error (e.g. a rejected command)
    pub fn format_local_error(error: &dyn std::error::Error) -> String {
        format!("! {}\n", error)
    }
}
