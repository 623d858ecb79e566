//! HTTP / WebSocket front end.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::websocket::CHAT_PATH;
pub use server::Server;
