//! Hearth broadcast relay.
//!
//! Clients connect over WebSocket, send text or image messages, and receive
//! every message sent by any connected client, preceded by a bounded replay
//! of recent history when they join.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
