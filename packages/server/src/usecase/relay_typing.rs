//! UseCase: typing シグナルのリレー（relay-typing）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayTypingUseCase::execute() が送信者を除く room メンバーにだけ届けること
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メンバーの room で送信者以外に届く
//! - エッジケース：送信者しかいない room（配信先なし）
//! - エッジケース：送信者が join していない room への送信
//!
//! リレーは typing 状態を保持せず、「入力終了」イベントも送りません。
//! 表示の失効（3 秒）は受信側の責務です。

use std::sync::Arc;

use crate::domain::{ConnectionId, RelayRepository, RoomKey};

/// relay-typing のユースケース
pub struct RelayTypingUseCase {
    repository: Arc<dyn RelayRepository>,
}

impl RelayTypingUseCase {
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// `frame` を送信者以外の room メンバーに届け、届いた数を返す
    pub async fn execute(&self, sender: &ConnectionId, room: &RoomKey, frame: String) -> usize {
        let targets = self.typing_targets(sender, room).await;
        if targets.is_empty() {
            return 0;
        }
        self.repository.deliver(&targets, frame).await
    }

    /// 送信者を除いた room メンバー
    async fn typing_targets(&self, sender: &ConnectionId, room: &RoomKey) -> Vec<ConnectionId> {
        self.repository
            .members(room)
            .await
            .into_iter()
            .filter(|id| id != sender)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionIdFactory, MockRelayRepository};
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_typing_excludes_sender() {
        // テスト項目: typing は送信者以外のメンバーにだけ配信される
        // given (前提条件):
        let alice = ConnectionIdFactory::generate();
        let bob = ConnectionIdFactory::generate();
        let carol = ConnectionIdFactory::generate();
        let members = vec![alice.clone(), bob.clone(), carol.clone()];

        let delivered_to = Arc::new(Mutex::new(Vec::new()));
        let captured = delivered_to.clone();

        let mut repository = MockRelayRepository::new();
        repository
            .expect_members()
            .times(1)
            .returning(move |_| members.clone());
        repository
            .expect_deliver()
            .times(1)
            .returning(move |targets, _frame| {
                captured.lock().unwrap().extend(targets.iter().cloned());
                targets.len()
            });
        let usecase = RelayTypingUseCase::new(Arc::new(repository));

        // when (操作):
        let delivered = usecase
            .execute(&alice, &RoomKey::from("family-42"), "typing".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        let targets = delivered_to.lock().unwrap().clone();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&bob));
        assert!(targets.contains(&carol));
        assert!(!targets.contains(&alice));
    }

    #[tokio::test]
    async fn test_typing_alone_in_room_delivers_nothing() {
        // テスト項目: 送信者しかいない room では deliver が呼ばれない
        let alice = ConnectionIdFactory::generate();
        let only_alice = vec![alice.clone()];

        let mut repository = MockRelayRepository::new();
        repository
            .expect_members()
            .returning(move |_| only_alice.clone());
        repository.expect_deliver().never();
        let usecase = RelayTypingUseCase::new(Arc::new(repository));

        let delivered = usecase
            .execute(&alice, &RoomKey::from("family-42"), "typing".to_string())
            .await;

        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_typing_from_non_member_reaches_all_members() {
        // テスト項目: room に join していない送信者からの typing は全メンバーに届く
        let outsider = ConnectionIdFactory::generate();
        let bob = ConnectionIdFactory::generate();
        let members = vec![bob.clone()];

        let mut repository = MockRelayRepository::new();
        repository
            .expect_members()
            .returning(move |_| members.clone());
        repository
            .expect_deliver()
            .times(1)
            .returning(|targets, _| targets.len());
        let usecase = RelayTypingUseCase::new(Arc::new(repository));

        let delivered = usecase
            .execute(&outsider, &RoomKey::from("family-42"), "typing".to_string())
            .await;

        assert_eq!(delivered, 1);
    }
}
