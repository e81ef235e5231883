//! Route table.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{get_room_detail, health_check, list_rooms, publish_message, websocket_handler},
    state::AppState,
};

/// Build the application router.
///
/// - `GET  /api/socket`: relay WebSocket endpoint
/// - `GET  /api/health`
/// - `GET  /api/rooms`, `GET /api/rooms/{room}`: membership introspection
/// - `POST /api/rooms/{room}/messages`: server-side publish hook
///
/// `{room}` is one path segment, percent-decoded. Keys containing `/` must be
/// sent encoded (`%2F`). The empty key cannot be addressed by these routes;
/// it still shows up in `GET /api/rooms` and is reachable over the socket.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/socket", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/{room}", get(get_room_detail))
        .route("/api/rooms/{room}/messages", post(publish_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
