//! Shared application state.

use std::{sync::Arc, time::Duration};

use gridroom_shared::time::Clock;

use crate::{
    domain::{Grid, IdentityVerifier, RoomRegistry, SpaceDirectory},
    usecase::{
        GetSpaceDetailUseCase, GetSpacesUseCase, JoinSpaceUseCase, LeaveSpaceUseCase,
        MoveParticipantUseCase, SendChatUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// JoinSpaceUseCase（スペース参加のユースケース）
    pub join_space_usecase: Arc<JoinSpaceUseCase>,
    /// MoveParticipantUseCase（移動のユースケース）
    pub move_participant_usecase: Arc<MoveParticipantUseCase>,
    /// SendChatUseCase（チャット送信のユースケース）
    pub send_chat_usecase: Arc<SendChatUseCase>,
    /// LeaveSpaceUseCase（退出のユースケース）
    pub leave_space_usecase: Arc<LeaveSpaceUseCase>,
    /// GetSpacesUseCase（アクティブな Room 一覧取得のユースケース）
    pub get_spaces_usecase: Arc<GetSpacesUseCase>,
    /// GetSpaceDetailUseCase（Room 詳細取得のユースケース）
    pub get_space_detail_usecase: Arc<GetSpaceDetailUseCase>,
}

impl AppState {
    /// Wire every UseCase around one shared registry.
    ///
    /// # Arguments
    ///
    /// * `registry` - Room Registry shared by all connections
    /// * `identity` - Identity collaborator used on join
    /// * `directory` - Persistence collaborator used on join
    /// * `clock` - Source of join and chat timestamps
    /// * `grid` - Grid dimensions for spawning and move validation
    /// * `collaborator_timeout` - Upper bound for each collaborator call
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        identity: Arc<dyn IdentityVerifier>,
        directory: Arc<dyn SpaceDirectory>,
        clock: Arc<dyn Clock>,
        grid: Grid,
        collaborator_timeout: Duration,
    ) -> Self {
        Self {
            join_space_usecase: Arc::new(JoinSpaceUseCase::new(
                identity,
                directory,
                registry.clone(),
                clock.clone(),
                grid,
                collaborator_timeout,
            )),
            move_participant_usecase: Arc::new(MoveParticipantUseCase::new(
                registry.clone(),
                grid,
            )),
            send_chat_usecase: Arc::new(SendChatUseCase::new(registry.clone(), clock)),
            leave_space_usecase: Arc::new(LeaveSpaceUseCase::new(registry.clone())),
            get_spaces_usecase: Arc::new(GetSpacesUseCase::new(registry.clone())),
            get_space_detail_usecase: Arc::new(GetSpaceDetailUseCase::new(registry)),
        }
    }
}
