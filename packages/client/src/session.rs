//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use hearth_server::infrastructure::dto::websocket::{decode_frame, encode_frame};
use hearth_shared::time::{SystemClock, clock_time_local};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{command::parse_command, domain::SeenMessages, error::ClientError};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one WebSocket client session.
///
/// Returns `Ok(())` when the user ends input,
/// `Err(ClientError::ConnectionError)` when the connection cannot be
/// established, and `Err(ClientError::ConnectionLost)` when it drops later.
pub async fn run_client_session(
    url: &str,
    username: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to relay at {}", url);
    println!(
        "\nYou are '{}'. Type messages and press Enter to send.\n\
         Commands: /image <path>, /reply <id> <text>. Press Ctrl+C to exit.\n",
        username
    );

    let (mut write, mut read) = ws_stream.split();
    let seen = Arc::new(Mutex::new(SeenMessages::new()));

    // Spawn a task to handle incoming frames (history replay first, then live)
    let seen_for_read = seen.clone();
    let username_for_read = username.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match decode_frame(text.as_str()) {
                        Ok(chat_msg) => {
                            let time_label = clock_time_local(&chat_msg.timestamp)
                                .unwrap_or_else(|| chat_msg.timestamp.clone());
                            let is_me = chat_msg.username == username_for_read;
                            let formatted =
                                MessageFormatter::format_chat_message(&chat_msg, &time_label, is_me);
                            seen_for_read.lock().await.record(chat_msg);
                            formatted
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&username_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&username_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionLost("server went away".to_string()));
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Ctrl+C / Ctrl+D
                    read_task.abort();
                    write.close().await.ok();
                    return Ok(());
                };

                let frame = match compose_frame(&line, username, &seen).await {
                    Ok(frame) => frame,
                    Err(e) => {
                        print!("{}", MessageFormatter::format_local_error(&e));
                        redisplay_prompt(username);
                        continue;
                    }
                };

                if let Err(e) = write.send(Message::text(frame)).await {
                    tracing::warn!("Failed to send message: {}", e);
                    read_task.abort();
                    return Err(ClientError::ConnectionLost("server went away".to_string()));
                }
            }
        }
    }
}

/// Turn an input line into a serialized chat frame
async fn compose_frame(
    line: &str,
    username: &str,
    seen: &Mutex<SeenMessages>,
) -> Result<String, ClientError> {
    let command = parse_command(line)?;
    let message = {
        let seen = seen.lock().await;
        command.into_message(username, &seen, &SystemClock)?
    };
    Ok(encode_frame(&message)?)
}
