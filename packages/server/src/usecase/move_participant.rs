//! UseCase: 移動処理
//!
//! 検証と位置更新・ブロードキャストは Registry の `relocate` が 1 回の排他区間で行う。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Grid, MoveOutcome, Position, RegistryError, RoomRegistry, SpaceId,
};

/// 移動のユースケース
pub struct MoveParticipantUseCase {
    registry: Arc<dyn RoomRegistry>,
    grid: Grid,
}

impl MoveParticipantUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, grid: Grid) -> Self {
        Self { registry, grid }
    }

    /// 移動要求を処理
    ///
    /// # Returns
    ///
    /// * `Ok(MoveOutcome::Accepted)` - 位置を更新し、他のメンバーへ通知済み
    /// * `Ok(MoveOutcome::Rejected)` - 自分にだけ現在位置を返送済み
    /// * `Err(RegistryError::NotMember)` - Room に登録されていない
    pub async fn execute(
        &self,
        space_id: &SpaceId,
        connection_id: &ConnectionId,
        proposed: Position,
    ) -> Result<MoveOutcome, RegistryError> {
        let outcome = self
            .registry
            .relocate(space_id, connection_id, proposed, self.grid)
            .await?;

        match &outcome {
            MoveOutcome::Accepted(position) => {
                tracing::debug!("Connection '{}' moved to {}", connection_id, position);
            }
            MoveOutcome::Rejected { current, reason } => {
                tracing::debug!(
                    "Connection '{}' move to {} rejected ({}), staying at {}",
                    connection_id,
                    proposed,
                    reason,
                    current
                );
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MoveRejection, Participant, Role, ServerEvent, Timestamp, UserId, Username},
        infrastructure::registry::InMemoryRoomRegistry,
    };
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn participant(connection: &str, user: &str, position: Position) -> Participant {
        Participant::new(
            ConnectionId::new(connection.to_string()).unwrap(),
            UserId::new(user.to_string()).unwrap(),
            Username::new(user.to_string()).unwrap(),
            Role::User,
            position,
            Timestamp::new(0),
        )
    }

    async fn setup() -> (
        MoveParticipantUseCase,
        Arc<InMemoryRoomRegistry>,
        SpaceId,
        UnboundedReceiver<ServerEvent>,
        UnboundedReceiver<ServerEvent>,
    ) {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let space_id = SpaceId::new("r1".to_string()).unwrap();
        let (tx_a, rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();
        registry
            .add(&space_id, participant("c-a", "u-a", Position::new(5, 5)), tx_a)
            .await
            .unwrap();
        registry
            .add(&space_id, participant("c-b", "u-b", Position::new(0, 0)), tx_b)
            .await
            .unwrap();
        let usecase = MoveParticipantUseCase::new(registry.clone(), Grid::default());
        (usecase, registry, space_id, rx_a, rx_b)
    }

    #[tokio::test]
    async fn test_move_accepted_updates_and_notifies_others() {
        // テスト項目: 1 マスの移動は受理され、他のメンバーにだけ movement が届く
        // given (前提条件):
        let (usecase, registry, space_id, mut rx_a, mut rx_b) = setup().await;
        let mover = ConnectionId::new("c-a".to_string()).unwrap();

        // when (操作):
        let outcome = usecase
            .execute(&space_id, &mover, Position::new(6, 5))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome, MoveOutcome::Accepted(Position::new(6, 5)));
        assert_eq!(registry.list(&space_id).await[0].position, Position::new(6, 5));
        assert_eq!(
            rx_b.try_recv().unwrap(),
            ServerEvent::Movement {
                user_id: UserId::new("u-a".to_string()).unwrap(),
                position: Position::new(6, 5),
                role: Role::User,
            }
        );
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_move_rejected_replies_only_to_mover() {
        // テスト項目: 2 マス以上の移動は拒否され、本人にだけ現在位置が返る
        // given (前提条件):
        let (usecase, registry, space_id, mut rx_a, mut rx_b) = setup().await;
        let mover = ConnectionId::new("c-a".to_string()).unwrap();

        // when (操作):
        let outcome = usecase
            .execute(&space_id, &mover, Position::new(7, 5))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            outcome,
            MoveOutcome::Rejected {
                current: Position::new(5, 5),
                reason: MoveRejection::NotUnitStep { dx: 2, dy: 0 },
            }
        );
        assert_eq!(registry.list(&space_id).await[0].position, Position::new(5, 5));
        assert_eq!(
            rx_a.try_recv().unwrap(),
            ServerEvent::MovementRejected(Position::new(5, 5))
        );
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_move_out_of_bounds_is_rejected() {
        // テスト項目: グリッド外への 1 マス移動は拒否される
        // given (前提条件):
        let (usecase, _registry, space_id, mut rx_a, _rx_b) = setup().await;
        let corner = ConnectionId::new("c-b".to_string()).unwrap();

        // when (操作):
        let outcome = usecase
            .execute(&space_id, &corner, Position::new(-1, 0))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(matches!(
            outcome,
            MoveOutcome::Rejected {
                reason: MoveRejection::OutOfBounds(_),
                ..
            }
        ));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_move_unknown_connection_is_not_member() {
        // テスト項目: 登録されていない接続の移動は NotMember になる
        // given (前提条件):
        let (usecase, _registry, space_id, _rx_a, _rx_b) = setup().await;
        let stranger = ConnectionId::new("c-x".to_string()).unwrap();

        // when (操作):
        let result = usecase
            .execute(&space_id, &stranger, Position::new(1, 0))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RegistryError::NotMember(_))));
    }
}
