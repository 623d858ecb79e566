//! Command-line client for the Hearth broadcast relay.
//!
//! Reads lines from the terminal, sends them as chat frames and prints every
//! frame the relay broadcasts, history replay included.

mod command;
mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
