//! Command-line arguments.

use clap::Parser;

/// Join a family room on the relay and chat from the terminal
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "famchat-client", version, about)]
pub struct ClientArgs {
    /// Relay WebSocket URL
    #[arg(long, default_value = "ws://127.0.0.1:8080/api/socket")]
    pub url: String,

    /// Family room to join
    #[arg(short, long)]
    pub room: String,

    /// Display name used for messages and typing signals
    #[arg(short, long)]
    pub user: String,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
