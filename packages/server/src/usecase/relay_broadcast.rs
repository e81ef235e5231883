//! UseCase: メッセージのリレー（relay-broadcast）
//!
//! room に join している全ての接続にフレームを届けます。送信者自身も
//! join していればエコーとして受け取ります。
//! 配信は best-effort で、ACK・リトライ・バッファリングはありません。
//! 受信者が 0 人でもエラーにはなりません。

use std::sync::Arc;

use crate::domain::{RelayRepository, RoomKey};

/// relay-broadcast のユースケース
pub struct RelayBroadcastUseCase {
    repository: Arc<dyn RelayRepository>,
}

impl RelayBroadcastUseCase {
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// シリアライズ済みの `frame` を room の全メンバーに届け、届いた数を返す
    pub async fn execute(&self, room: &RoomKey, frame: String) -> usize {
        let targets = self.repository.members(room).await;
        if targets.is_empty() {
            tracing::debug!("No listeners in room '{}'", room);
            return 0;
        }
        self.repository.deliver(&targets, frame).await
    }
}
