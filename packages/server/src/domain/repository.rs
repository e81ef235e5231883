//! Repository trait for the relay's connection and membership state.
//!
//! The use case layer depends on this trait only; the concrete store lives in
//! `infrastructure::repository`.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    entity::Connection,
    error::RepositoryError,
    value_object::{ConnectionId, RoomKey},
};

/// Frames a connection may have waiting for its socket. Frames beyond this
/// are dropped for that connection, not queued.
pub const OUTBOUND_CAPACITY: usize = 64;

/// Outbound channel of one connection. Each item is one serialized text frame.
pub type FrameSender = mpsc::Sender<String>;
pub type FrameReceiver = mpsc::Receiver<String>;

/// Outbound channel for a new connection, bounded by [`OUTBOUND_CAPACITY`].
pub fn frame_channel() -> (FrameSender, FrameReceiver) {
    mpsc::channel(OUTBOUND_CAPACITY)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelayRepository: Send + Sync {
    /// Register a freshly upgraded connection and its outbound channel.
    async fn register(
        &self,
        connection: Connection,
        sender: FrameSender,
    ) -> Result<(), RepositoryError>;

    /// Drop a connection and every room membership it held.
    ///
    /// Returns the rooms it was removed from.
    async fn unregister(&self, id: &ConnectionId) -> Result<Vec<RoomKey>, RepositoryError>;

    /// Add a registered connection to `room`. `Ok(false)` if it was already there.
    async fn join(&self, id: &ConnectionId, room: RoomKey) -> Result<bool, RepositoryError>;

    /// Connections currently joined to `room`.
    async fn members(&self, room: &RoomKey) -> Vec<ConnectionId>;

    async fn get_connection(&self, id: &ConnectionId) -> Result<Connection, RepositoryError>;

    /// Non-empty rooms with their members, sorted by room key.
    async fn list_rooms(&self) -> Vec<(RoomKey, Vec<ConnectionId>)>;

    async fn count_connections(&self) -> usize;

    /// Push `frame` onto the outbound channel of each target without waiting.
    ///
    /// Targets that are gone, closed, or already holding a full queue are
    /// skipped and the frame is lost for them. Returns how many channels
    /// accepted the frame.
    async fn deliver(&self, targets: &[ConnectionId], frame: String) -> usize;
}
