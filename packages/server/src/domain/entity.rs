//! Core domain models for the relay.

use std::collections::{BTreeMap, BTreeSet};

use super::value_object::{ConnectionId, RoomKey, Timestamp};

/// A live link to the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self { id, connected_at }
    }
}

/// Room membership table.
///
/// Maps each room key to the connections joined to it, plus the reverse index
/// used to clean up on disconnect. A room exists only while it has at least
/// one member.
#[derive(Debug, Clone, Default)]
pub struct RoomDirectory {
    rooms: BTreeMap<RoomKey, BTreeSet<ConnectionId>>,
    joined: BTreeMap<ConnectionId, BTreeSet<RoomKey>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `connection` to `room`.
    ///
    /// Returns `false` if it was already a member (joining twice is a no-op).
    pub fn join(&mut self, connection: ConnectionId, room: RoomKey) -> bool {
        let inserted = self
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(connection.clone());
        if inserted {
            self.joined.entry(connection).or_default().insert(room);
        }
        inserted
    }

    /// Remove `connection` from every room it joined and return those rooms.
    pub fn leave_all(&mut self, connection: &ConnectionId) -> Vec<RoomKey> {
        let Some(rooms) = self.joined.remove(connection) else {
            return Vec::new();
        };

        for room in &rooms {
            if let Some(members) = self.rooms.get_mut(room) {
                members.remove(connection);
                if members.is_empty() {
                    self.rooms.remove(room);
                }
            }
        }

        rooms.into_iter().collect()
    }

    /// Members of `room`, sorted. Empty for a room nobody joined.
    pub fn members(&self, room: &RoomKey) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every non-empty room with its members, sorted by room key.
    pub fn snapshot(&self) -> Vec<(RoomKey, Vec<ConnectionId>)> {
        self.rooms
            .iter()
            .map(|(room, members)| (room.clone(), members.iter().cloned().collect()))
            .collect()
    }
}
