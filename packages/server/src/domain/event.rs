//! Events pushed from the server to a connection.
//!
//! The wire representation lives in `infrastructure::dto::websocket`; the UI layer
//! encodes each event right before writing it to the socket.

use tokio::sync::mpsc;

use super::{
    entity::Participant,
    value_object::{Position, Role, Timestamp, UserId, Username},
};

/// Outbound queue of one connection.
///
/// Unbounded: fan-out never waits on a slow socket, so a client that stops reading
/// keeps accumulating events until its connection is closed.
pub type PusherChannel = mpsc::UnboundedSender<ServerEvent>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Reply to a successful join, with the occupants present before the joiner.
    SpaceJoined {
        user_id: UserId,
        spawn: Position,
        users: Vec<Participant>,
        role: Role,
    },
    UserJoined(Participant),
    Movement {
        user_id: UserId,
        position: Position,
        role: Role,
    },
    /// Carries the unchanged authoritative position so the client can snap back.
    MovementRejected(Position),
    UserLeft {
        user_id: UserId,
    },
    ChatMessage {
        user_id: UserId,
        username: Username,
        message: String,
        timestamp: Timestamp,
    },
}

impl ServerEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::SpaceJoined { .. } => "space-joined",
            ServerEvent::UserJoined(_) => "user-joined",
            ServerEvent::Movement { .. } => "movement",
            ServerEvent::MovementRejected(_) => "movement-rejected",
            ServerEvent::UserLeft { .. } => "user-left",
            ServerEvent::ChatMessage { .. } => "chat-message",
        }
    }
}
