//! WebSocket connection handlers.
//!
//! Each connection runs as a pair of tasks: the reader (this handler's task)
//! decodes inbound frames and hands them to the registry, and the writer
//! (`pusher_loop`) drains the connection's outbound queue into the socket.
//! Whichever side ends first ends the session, after which the connection is
//! removed from the registry exactly once.

use std::{ops::ControlFlow, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::decode_frame,
    ui::state::AppState,
    usecase::BroadcastRegistry,
};

/// Path of the single chat endpoint
pub const CHAT_PATH: &str = "/ws/chat";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the outbound queue into the WebSocket sink.
///
/// The task ends when the queue is closed or a send fails; in the latter
/// case the dropped receiver makes later pushes to this connection fail.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.into())).await {
                tracing::debug!("Failed to write frame to socket: {}", e);
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (sender, receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = state.registry.admit(connection_id, tx).await {
        tracing::warn!("Failed to admit connection '{}': {}", connection_id, e);
        return;
    }

    let send_task = pusher_loop(rx, sender);
    relay_until_closed(receiver, send_task, &state.registry, connection_id).await;
}

/// Feed inbound frames to the registry until either side of the connection
/// ends, then remove the connection.
///
/// Only the wait for the next frame is cancelled by the writer ending; a
/// frame that has been received is always fully appended and fanned out.
async fn relay_until_closed<S>(
    mut receiver: S,
    mut send_task: JoinHandle<()>,
    registry: &BroadcastRegistry,
    connection_id: ConnectionId,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let inbound = tokio::select! {
            inbound = receiver.next() => inbound,
            _ = &mut send_task => {
                tracing::debug!("Writer for '{}' ended", connection_id);
                break;
            }
        };
        if broadcast_inbound(inbound, registry, &connection_id)
            .await
            .is_break()
        {
            break;
        }
    }

    send_task.abort();
    registry.remove(&connection_id).await;
    tracing::info!("Connection '{}' disconnected", connection_id);
}

/// Handle one inbound item from a connection's stream.
///
/// A text frame is decoded and broadcast through the registry. A malformed
/// frame is discarded without ending the session. Returns `Break` when the
/// stream has ended, errored or the peer sent a close frame.
pub async fn broadcast_inbound(
    inbound: Option<Result<Message, axum::Error>>,
    registry: &BroadcastRegistry,
    connection_id: &ConnectionId,
) -> ControlFlow<()> {
    let message = match inbound {
        Some(Ok(message)) => message,
        Some(Err(e)) => {
            tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
            return ControlFlow::Break(());
        }
        None => return ControlFlow::Break(()),
    };

    match message {
        Message::Text(text) => {
            tracing::debug!(
                "Received frame from '{}' ({} bytes)",
                connection_id,
                text.as_str().len()
            );
            match decode_frame(text.as_str()) {
                Ok(chat_message) => match registry.broadcast(chat_message).await {
                    Ok(report) => tracing::debug!(
                        "Broadcast from '{}' delivered to {} connection(s)",
                        connection_id,
                        report.delivered
                    ),
                    Err(e) => tracing::warn!("Failed to broadcast message: {}", e),
                },
                Err(e) => tracing::warn!(
                    "Discarding malformed frame from '{}': {}",
                    connection_id,
                    e
                ),
            }
            ControlFlow::Continue(())
        }
        Message::Binary(data) => {
            tracing::debug!(
                "Ignoring binary frame from '{}' ({} bytes)",
                connection_id,
                data.len()
            );
            ControlFlow::Continue(())
        }
        Message::Ping(_) | Message::Pong(_) => ControlFlow::Continue(()),
        Message::Close(_) => {
            tracing::info!("Connection '{}' requested close", connection_id);
            ControlFlow::Break(())
        }
    }
}
