//! WebSocket relay server: router, handlers and process lifecycle.

mod handler;
mod router;
mod runner;
mod signal;
pub mod state;

pub use router::create_router;
pub use runner::{run, serve};
pub use state::AppState;
