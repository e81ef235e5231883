//! UseCase: 接続登録処理
//!
//! アップグレード直後の接続に一時的な ConnectionId を払い出し、
//! 送信チャンネルとともに Repository に登録します。
//! この時点ではどの room にも属していません（join するまで何も受信しない）。

use std::sync::Arc;

use famchat_shared::time::now_millis;

use crate::domain::{Connection, ConnectionIdFactory, FrameSender, RelayRepository, Timestamp};

use super::error::ConnectError;

/// 接続登録のユースケース
pub struct ConnectConnectionUseCase {
    repository: Arc<dyn RelayRepository>,
}

impl ConnectConnectionUseCase {
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// 接続登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - 払い出した ID と接続時刻
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(&self, sender: FrameSender) -> Result<Connection, ConnectError> {
        let connection = Connection::new(
            ConnectionIdFactory::generate(),
            Timestamp::new(now_millis()),
        );
        self.repository.register(connection.clone(), sender).await?;
        Ok(connection)
    }
}
