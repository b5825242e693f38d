//! UseCase: 退出処理
//!
//! 接続の終了（正常・異常を問わず）時に一度だけ呼ばれる。

use std::sync::Arc;

use crate::domain::{ConnectionId, Participant, RoomRegistry, SpaceId};

/// 退出のユースケース
pub struct LeaveSpaceUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveSpaceUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 残りのメンバーへ `user-left` を配信してから登録を解除する
    ///
    /// 登録されていない接続に対しては何もしない。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        space_id: &SpaceId,
    ) -> Option<Participant> {
        let left = self.registry.leave(connection_id, space_id).await;
        match &left {
            Some(participant) => tracing::info!(
                "User '{}' left space '{}'",
                participant.user_id,
                space_id
            ),
            None => tracing::debug!(
                "Connection '{}' was not registered in '{}'",
                connection_id,
                space_id
            ),
        }
        left
    }
}
