//! Interactive CLI client for the family chat relay.

pub mod args;
pub mod error;
pub mod message;
pub mod session;
pub mod typing;

pub use args::ClientArgs;
pub use error::ClientError;
pub use session::run_client;
