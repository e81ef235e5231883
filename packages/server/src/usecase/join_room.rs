//! UseCase: room への join
//!
//! room key は検証しません。どんな文字列でも有効な room として扱います。
//! 同じ room への 2 回目以降の join は何もしません。

use std::sync::Arc;

use crate::domain::{ConnectionId, RelayRepository, RoomKey};

use super::error::JoinRoomError;

/// join のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RelayRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// join を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 新しく room に加わった
    /// * `Ok(false)` - 既に room のメンバーだった
    /// * `Err(JoinRoomError)` - 接続が登録されていない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room: RoomKey,
    ) -> Result<bool, JoinRoomError> {
        Ok(self.repository.join(connection_id, room).await?)
    }
}
