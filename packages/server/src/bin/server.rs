//! WebSocket broadcast relay server.
//!
//! Every message received from a client is appended to a bounded history and
//! broadcast to all connected clients, the sender included. New clients are
//! sent the history first.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-server
//! cargo run --bin hearth-server -- --host 0.0.0.0 --port 3000 --history-capacity 500
//! ```

use std::sync::Arc;

use clap::Parser;
use hearth_server::{
    domain::DEFAULT_HISTORY_CAPACITY,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryHistoryRepository},
    ui::Server,
    usecase::BroadcastRegistry,
};
use hearth_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hearth-server")]
#[command(about = "WebSocket broadcast relay with bounded history replay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Number of recent messages replayed to new connections
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // 1. Repository / MessagePusher
    let repository = Arc::new(InMemoryHistoryRepository::new(args.history_capacity));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 2. Registry
    let registry = Arc::new(BroadcastRegistry::new(repository, message_pusher));
    tracing::info!("History capacity: {}", args.history_capacity);

    // 3. Server
    let server = Server::new(registry);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
