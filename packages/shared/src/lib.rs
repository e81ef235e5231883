//! Utilities shared by the famchat server and client binaries.

pub mod logger;
pub mod time;
