//! Domain layer for the relay.
//!
//! This module contains the membership rules that are independent of
//! the wire format (DTOs) and of how state is stored.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{Connection, RoomDirectory};
pub use error::RepositoryError;
pub use factory::ConnectionIdFactory;
#[cfg(test)]
pub use repository::MockRelayRepository;
pub use repository::{
    FrameReceiver, FrameSender, OUTBOUND_CAPACITY, RelayRepository, frame_channel,
};
pub use value_object::{ConnectionId, RoomKey, Timestamp};
