//! Domain layer: chat messages, the bounded history log and the seams
//! (traits) the registry depends on.

pub mod entity;
pub mod error;
pub mod history;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Extensions, MessageKind, ReplySnapshot};
pub use error::MessagePushError;
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryBuffer};
pub use pusher::{MessagePusher, PusherChannel};
pub use repository::HistoryRepository;
pub use value_object::{ConnectionId, ConnectionIdFactory};
