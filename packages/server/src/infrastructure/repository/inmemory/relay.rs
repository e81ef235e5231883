//! InMemory Relay Repository 実装
//!
//! ドメイン層が定義する RelayRepository trait の具体的な実装。
//! 接続ごとの送信チャンネルと RoomDirectory を 1 つの Mutex の下で保持します。
//! プロセス外には何も保存しません（プロセス終了とともに消える状態です）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{
    Connection, ConnectionId, FrameSender, RelayRepository, RepositoryError, RoomDirectory,
    RoomKey,
};

struct ConnectionEntry {
    connection: Connection,
    sender: FrameSender,
}

#[derive(Default)]
struct RelayTables {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    directory: RoomDirectory,
}

/// インメモリ Relay Repository 実装
#[derive(Default)]
pub struct InMemoryRelayRepository {
    tables: Mutex<RelayTables>,
}

impl InMemoryRelayRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RelayRepository for InMemoryRelayRepository {
    async fn register(
        &self,
        connection: Connection,
        sender: FrameSender,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.connections.contains_key(&connection.id) {
            return Err(RepositoryError::DuplicateConnection(
                connection.id.into_string(),
            ));
        }
        tables
            .connections
            .insert(connection.id.clone(), ConnectionEntry { connection, sender });
        Ok(())
    }

    async fn unregister(&self, id: &ConnectionId) -> Result<Vec<RoomKey>, RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables
            .connections
            .remove(id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(id.to_string()))?;
        Ok(tables.directory.leave_all(id))
    }

    async fn join(&self, id: &ConnectionId, room: RoomKey) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.connections.contains_key(id) {
            return Err(RepositoryError::ConnectionNotFound(id.to_string()));
        }
        Ok(tables.directory.join(id.clone(), room))
    }

    async fn members(&self, room: &RoomKey) -> Vec<ConnectionId> {
        let tables = self.tables.lock().await;
        tables.directory.members(room)
    }

    async fn get_connection(&self, id: &ConnectionId) -> Result<Connection, RepositoryError> {
        let tables = self.tables.lock().await;
        tables
            .connections
            .get(id)
            .map(|entry| entry.connection.clone())
            .ok_or_else(|| RepositoryError::ConnectionNotFound(id.to_string()))
    }

    async fn list_rooms(&self) -> Vec<(RoomKey, Vec<ConnectionId>)> {
        let tables = self.tables.lock().await;
        tables.directory.snapshot()
    }

    async fn count_connections(&self) -> usize {
        let tables = self.tables.lock().await;
        tables.connections.len()
    }

    async fn deliver(&self, targets: &[ConnectionId], frame: String) -> usize {
        let tables = self.tables.lock().await;
        let mut delivered = 0;
        for target in targets {
            let Some(entry) = tables.connections.get(target) else {
                tracing::debug!("Skipping '{}': no longer connected", target);
                continue;
            };
            match entry.sender.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("Outbound queue of '{}' is full, dropping frame", target);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!("Outbound channel of '{}' is closed", target);
                }
            }
        }
        delivered
    }
}
