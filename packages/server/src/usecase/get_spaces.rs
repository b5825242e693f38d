//! UseCase: アクティブな Room の参照（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Participant, RoomRegistry, RoomSummary, SpaceId};

use super::error::GetSpaceDetailError;

/// アクティブな Room 一覧取得のユースケース
pub struct GetSpacesUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetSpacesUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.registry.rooms().await
    }
}

/// Room 詳細取得のユースケース
pub struct GetSpaceDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetSpaceDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者一覧を参加順で返す
    ///
    /// 空の Room は存在しないため、参加者がいなければ `RoomNotFound`。
    pub async fn execute(
        &self,
        space_id: String,
    ) -> Result<(SpaceId, Vec<Participant>), GetSpaceDetailError> {
        let not_found = || GetSpaceDetailError::RoomNotFound(space_id.clone());
        let id = SpaceId::new(space_id.clone()).map_err(|_| not_found())?;
        let participants = self.registry.list(&id).await;
        if participants.is_empty() {
            return Err(not_found());
        }
        Ok((id, participants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, Position, Role, Timestamp, UserId, Username},
        infrastructure::registry::InMemoryRoomRegistry,
    };
    use tokio::sync::mpsc;

    fn participant(connection: &str) -> Participant {
        Participant::new(
            ConnectionId::new(connection.to_string()).unwrap(),
            UserId::new(format!("u-{}", connection)).unwrap(),
            Username::new(format!("name-{}", connection)).unwrap(),
            Role::User,
            Position::new(0, 0),
            Timestamp::new(0),
        )
    }

    #[tokio::test]
    async fn test_get_spaces_lists_active_rooms() {
        // テスト項目: アクティブな Room とその人数が取得できる
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let r1 = SpaceId::new("r1".to_string()).unwrap();
        let r2 = SpaceId::new("r2".to_string()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.add(&r1, participant("a"), tx.clone()).await.unwrap();
        registry.add(&r1, participant("b"), tx.clone()).await.unwrap();
        registry.add(&r2, participant("c"), tx).await.unwrap();
        let usecase = GetSpacesUseCase::new(registry);

        // when (操作):
        let mut rooms = usecase.execute().await;
        rooms.sort_by(|a, b| a.space_id.as_str().cmp(b.space_id.as_str()));

        // then (期待する結果):
        assert_eq!(
            rooms,
            vec![
                RoomSummary {
                    space_id: r1,
                    participant_count: 2
                },
                RoomSummary {
                    space_id: r2,
                    participant_count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_get_space_detail_returns_participants() {
        // テスト項目: Room の参加者一覧が参加順で取得できる
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let r1 = SpaceId::new("r1".to_string()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.add(&r1, participant("a"), tx.clone()).await.unwrap();
        registry.add(&r1, participant("b"), tx).await.unwrap();
        let usecase = GetSpaceDetailUseCase::new(registry);

        // when (操作):
        let (id, participants) = usecase.execute("r1".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(id, r1);
        assert_eq!(participants, vec![participant("a"), participant("b")]);
    }

    #[tokio::test]
    async fn test_get_space_detail_unknown_room() {
        // テスト項目: アクティブでない Room と空の ID は RoomNotFound になる
        // given (前提条件):
        let usecase = GetSpaceDetailUseCase::new(Arc::new(InMemoryRoomRegistry::new()));

        // when (操作):
        let unknown = usecase.execute("nowhere".to_string()).await;
        let empty = usecase.execute(String::new()).await;

        // then (期待する結果):
        assert_eq!(
            unknown,
            Err(GetSpaceDetailError::RoomNotFound("nowhere".to_string()))
        );
        assert_eq!(empty, Err(GetSpaceDetailError::RoomNotFound(String::new())));
    }
}
