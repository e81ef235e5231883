//! Interactive chat client for the family chat relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin famchat-client -- --room family-42 --user Carlos
//! ```

use clap::Parser;
use famchat_client::ClientArgs;
use famchat_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = famchat_client::run_client(args).await {
        tracing::error!("Client error: {}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
