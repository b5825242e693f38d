//! Conversion logic between domain values and DTOs.

use gridroom_shared::time::timestamp_to_rfc3339;

use crate::domain::{Participant, Position, RoomSummary, ServerEvent};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<Position> for dto::PositionDto {
    fn from(position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }
}

impl From<Participant> for dto::UserInfo {
    fn from(model: Participant) -> Self {
        Self {
            user_id: model.user_id.into_string(),
            username: model.username.into_string(),
            x: model.position.x,
            y: model.position.y,
            role: model.role.as_str().to_string(),
        }
    }
}

impl From<ServerEvent> for dto::ServerMessage {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::SpaceJoined {
                user_id,
                spawn,
                users,
                role,
            } => Self::SpaceJoined(dto::SpaceJoinedPayload {
                user_id: user_id.into_string(),
                spawn: spawn.into(),
                users: users.into_iter().map(Into::into).collect(),
                role: role.as_str().to_string(),
            }),
            ServerEvent::UserJoined(participant) => Self::UserJoined(participant.into()),
            ServerEvent::Movement {
                user_id,
                position,
                role,
            } => Self::Movement(dto::MovementPayload {
                user_id: user_id.into_string(),
                x: position.x,
                y: position.y,
                role: role.as_str().to_string(),
            }),
            ServerEvent::MovementRejected(position) => Self::MovementRejected(position.into()),
            ServerEvent::UserLeft { user_id } => Self::UserLeft(dto::UserLeftPayload {
                user_id: user_id.into_string(),
            }),
            ServerEvent::ChatMessage {
                user_id,
                username,
                message,
                timestamp,
            } => Self::ChatMessage(dto::ChatMessagePayload {
                user_id: user_id.into_string(),
                username: username.into_string(),
                message,
                timestamp: timestamp.value(),
            }),
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<Participant> for http::ParticipantDetailDto {
    fn from(model: Participant) -> Self {
        Self {
            user_id: model.user_id.into_string(),
            username: model.username.into_string(),
            x: model.position.x,
            y: model.position.y,
            role: model.role.as_str().to_string(),
            joined_at: timestamp_to_rfc3339(model.joined_at.value()),
        }
    }
}

impl From<RoomSummary> for http::SpaceSummaryDto {
    fn from(model: RoomSummary) -> Self {
        Self {
            id: model.space_id.into_string(),
            participant_count: model.participant_count,
        }
    }
}
