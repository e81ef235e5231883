//! Family chat relay.
//!
//! A process-local publish/subscribe hub: clients connect over WebSocket,
//! join a family room, and the relay fans `new-message` and `user-typing`
//! events out to the other connections in that room. Nothing is persisted.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
pub mod error;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::run as run_server;
