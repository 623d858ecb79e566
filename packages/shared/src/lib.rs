//! Utilities shared by the Hearth server and client binaries.

pub mod logger;
pub mod time;
