//! Family chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin famchat-server -- --port 8080
//! ```

use clap::Parser;
use famchat_server::ServerConfig;
use famchat_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    if let Err(e) = famchat_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
