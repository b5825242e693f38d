//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{ParticipantDetailDto, SpaceDetailDto, SpaceSummaryDto},
    ui::state::AppState,
    usecase::GetSpaceDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of active spaces
pub async fn get_spaces(State(state): State<Arc<AppState>>) -> Json<Vec<SpaceSummaryDto>> {
    let rooms = state.get_spaces_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(SpaceSummaryDto::from).collect())
}

/// Get participants of an active space
pub async fn get_space_detail(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<SpaceDetailDto>, StatusCode> {
    match state.get_space_detail_usecase.execute(space_id).await {
        Ok((space_id, participants)) => Ok(Json(SpaceDetailDto {
            id: space_id.into_string(),
            participants: participants
                .into_iter()
                .map(ParticipantDetailDto::from)
                .collect(),
        })),
        Err(GetSpaceDetailError::RoomNotFound(space_id)) => {
            tracing::debug!("No active room for space '{}'", space_id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
