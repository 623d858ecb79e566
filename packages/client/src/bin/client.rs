//! WebSocket chat client for the Hearth relay.
//!
//! Connects to the relay, prints the replayed history and every broadcast,
//! and sends each input line as a chat message.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-client -- --username alice
//! cargo run --bin hearth-client -- -n bob -u ws://127.0.0.1:3000/ws/chat
//! ```

use clap::Parser;

use hearth_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hearth-client")]
#[command(about = "WebSocket chat client for the Hearth broadcast relay", long_about = None)]
struct Args {
    /// Name shown next to your messages (not verified by the server)
    #[arg(short = 'n', long)]
    username: String,

    /// WebSocket URL of the relay's chat endpoint
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws/chat")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hearth_client::run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
