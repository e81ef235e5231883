//! UseCase: 切断処理
//!
//! 接続を Repository から外し、join していた全ての room から明示的に削除します。
//! 残ったメンバーへの退出通知は送りません。

use std::sync::Arc;

use crate::domain::{ConnectionId, RelayRepository, RoomKey};

use super::error::DisconnectError;

/// 切断のユースケース
pub struct DisconnectConnectionUseCase {
    repository: Arc<dyn RelayRepository>,
}

impl DisconnectConnectionUseCase {
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<RoomKey>)` - 抜けた room の一覧（ログ用）
    /// * `Err(DisconnectError)` - 接続が登録されていない
    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<Vec<RoomKey>, DisconnectError> {
        Ok(self.repository.unregister(connection_id).await?)
    }
}
