//! UseCase layer: the broadcast registry coordinating history and fan-out.

mod error;
mod registry;

pub use error::{ConnectError, SendMessageError};
pub use registry::{BroadcastRegistry, BroadcastReport};
