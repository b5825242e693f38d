//! UseCase: チャット送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//! - 送信者以外へのブロードキャストとタイムスタンプの付与
//!
//! ### どのような状況を想定しているか
//! - 正常系：他のメンバーへ配信される
//! - エッジケース：送信者のみの Room（配信対象なし）、空のメッセージ

use std::sync::Arc;

use gridroom_shared::time::Clock;

use crate::domain::{ConnectionId, RoomRegistry, ServerEvent, SpaceId, Timestamp, UserId, Username};

/// チャット送信のユースケース
pub struct SendChatUseCase {
    registry: Arc<dyn RoomRegistry>,
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// チャットを送信者以外のメンバーへ配信
    ///
    /// メッセージ本文は検証・加工しない（空文字列もそのまま配信する）。
    ///
    /// # Returns
    ///
    /// 配信できたメンバー数
    pub async fn execute(
        &self,
        space_id: &SpaceId,
        sender: &ConnectionId,
        user_id: UserId,
        username: Username,
        message: String,
    ) -> usize {
        let event = ServerEvent::ChatMessage {
            user_id,
            username,
            message,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        let delivered = self.registry.broadcast(event, Some(sender), space_id).await;
        tracing::debug!(
            "Chat from connection '{}' delivered to {} member(s) in '{}'",
            sender,
            delivered,
            space_id
        );
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Participant, Position, Role},
        infrastructure::registry::InMemoryRoomRegistry,
    };
    use gridroom_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn participant(connection: &str, user: &str) -> Participant {
        Participant::new(
            ConnectionId::new(connection.to_string()).unwrap(),
            UserId::new(user.to_string()).unwrap(),
            Username::new(user.to_string()).unwrap(),
            Role::User,
            Position::new(0, 0),
            Timestamp::new(0),
        )
    }

    #[tokio::test]
    async fn test_chat_is_delivered_to_others_with_timestamp() {
        // テスト項目: チャットが送信者以外に、サーバー時刻付きで配信される
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let space_id = SpaceId::new("r1".to_string()).unwrap();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.add(&space_id, participant("c-a", "u-a"), tx_a).await.unwrap();
        registry.add(&space_id, participant("c-b", "u-b"), tx_b).await.unwrap();
        let usecase = SendChatUseCase::new(registry, Arc::new(FixedClock::new(1234)));

        // when (操作):
        let delivered = usecase
            .execute(
                &space_id,
                &ConnectionId::new("c-a".to_string()).unwrap(),
                UserId::new("u-a".to_string()).unwrap(),
                Username::new("u-a".to_string()).unwrap(),
                "hi".to_string(),
            )
            .await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(
            rx_b.try_recv().unwrap(),
            ServerEvent::ChatMessage {
                user_id: UserId::new("u-a".to_string()).unwrap(),
                username: Username::new("u-a".to_string()).unwrap(),
                message: "hi".to_string(),
                timestamp: Timestamp::new(1234),
            }
        );
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_chat_alone_in_room_delivers_nothing() {
        // テスト項目: 送信者しかいない Room では配信数が 0 になる（空メッセージも許容）
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let space_id = SpaceId::new("r1".to_string()).unwrap();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        registry.add(&space_id, participant("c-a", "u-a"), tx_a).await.unwrap();
        let usecase = SendChatUseCase::new(registry, Arc::new(FixedClock::new(0)));

        // when (操作):
        let delivered = usecase
            .execute(
                &space_id,
                &ConnectionId::new("c-a".to_string()).unwrap(),
                UserId::new("u-a".to_string()).unwrap(),
                Username::new("u-a".to_string()).unwrap(),
                String::new(),
            )
            .await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
        assert!(rx_a.try_recv().is_err());
    }
}
