//! WebSocket message DTOs and framing.
//!
//! Every frame is a JSON text object `{"type": ..., "payload": {...}}`.
//! Inbound frames with an unknown `type` decode to `None` and are dropped by the caller;
//! invalid JSON or a payload missing a required field is a [`CodecError`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Inbound `type` names.
pub mod message_type {
    pub const JOIN: &str = "join";
    pub const MOVE: &str = "move";
    pub const CHAT: &str = "chat";
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("frame is not a valid message envelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    #[error("invalid payload for '{message_type}': {source}")]
    InvalidPayload {
        message_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

// ========================================
// Inbound (client → server)
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    pub space_id: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovePayload {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatPayload {
    pub message: String,
}

/// Decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Join(JoinPayload),
    Move(MovePayload),
    Chat(ChatPayload),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    message_type: String,
    #[serde(default)]
    payload: Value,
}

fn payload<T: for<'de> Deserialize<'de>>(message_type: &str, payload: Value) -> Result<T, CodecError> {
    serde_json::from_value(payload).map_err(|source| CodecError::InvalidPayload {
        message_type: message_type.to_string(),
        source,
    })
}

/// Decode one inbound text frame.
///
/// Returns `Ok(None)` for a well-formed envelope whose `type` is not recognized.
pub fn decode_client_message(text: &str) -> Result<Option<ClientMessage>, CodecError> {
    let envelope: Envelope = serde_json::from_str(text).map_err(CodecError::InvalidEnvelope)?;
    let message = match envelope.message_type.as_str() {
        message_type::JOIN => ClientMessage::Join(payload(message_type::JOIN, envelope.payload)?),
        message_type::MOVE => ClientMessage::Move(payload(message_type::MOVE, envelope.payload)?),
        message_type::CHAT => ClientMessage::Chat(payload(message_type::CHAT, envelope.payload)?),
        _ => return Ok(None),
    };
    Ok(Some(message))
}

// ========================================
// Outbound (server → client)
// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionDto {
    pub x: i32,
    pub y: i32,
}

/// One occupant as seen by other clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub username: String,
    pub x: i32,
    pub y: i32,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceJoinedPayload {
    pub user_id: String,
    pub spawn: PositionDto,
    pub users: Vec<UserInfo>,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementPayload {
    pub user_id: String,
    pub x: i32,
    pub y: i32,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLeftPayload {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    pub user_id: String,
    pub username: String,
    pub message: String,
    /// Unix time in milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ServerMessage {
    SpaceJoined(SpaceJoinedPayload),
    UserJoined(UserInfo),
    Movement(MovementPayload),
    MovementRejected(PositionDto),
    UserLeft(UserLeftPayload),
    ChatMessage(ChatMessagePayload),
}

pub fn encode_server_message(message: &ServerMessage) -> Result<String, CodecError> {
    serde_json::to_string(message).map_err(CodecError::Encode)
}
