//! HTTP API response DTOs.

use serde::Serialize;

/// `GET /api/spaces` の要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSummaryDto {
    pub id: String,
    pub participant_count: usize,
}

/// `GET /api/spaces/{space_id}` の参加者
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetailDto {
    pub user_id: String,
    pub username: String,
    pub x: i32,
    pub y: i32,
    pub role: String,
    /// RFC 3339
    pub joined_at: String,
}

/// `GET /api/spaces/{space_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDetailDto {
    pub id: String,
    pub participants: Vec<ParticipantDetailDto>,
}
