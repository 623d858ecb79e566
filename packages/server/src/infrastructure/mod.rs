//! Infrastructure layer: wire DTOs and the concrete implementations of the
//! domain traits.

pub mod dto;
pub mod message_pusher;
pub mod repository;
