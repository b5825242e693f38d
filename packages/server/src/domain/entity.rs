//! Entities.

use super::value_object::{ConnectionId, Position, Role, SpaceId, Timestamp, UserId, Username};

/// A joined participant.
///
/// The Room Registry owns the canonical record; connection handlers only keep ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub username: Username,
    pub role: Role,
    pub position: Position,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(
        connection_id: ConnectionId,
        user_id: UserId,
        username: Username,
        role: Role,
        position: Position,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            connection_id,
            user_id,
            username,
            role,
            position,
            joined_at,
        }
    }
}

/// 永続化コラボレーターから解決されるユーザー情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: Username,
    pub role: Role,
}

/// Room の概要（HTTP 参照用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub space_id: SpaceId,
    pub participant_count: usize,
}
