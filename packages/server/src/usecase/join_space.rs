//! UseCase: スペース参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinSpaceUseCase::execute() メソッド
//! - トークン検証 → スペース存在確認 → ユーザー情報解決 → Registry 登録 の順序
//!
//! ### なぜこのテストが必要か
//! - どの検証ステップで失敗しても登録が行われない（fail-closed）ことを保証
//! - コラボレーターの応答遅延がタイムアウトとして扱われることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加成功、スナップショット取得
//! - 異常系：認証失敗、スペース不在、タイムアウト、接続 ID 衝突
//! - エッジケース：ユーザー情報が存在しない（最低権限のロールにフォールバック）

use std::{future::Future, sync::Arc, time::Duration};

use gridroom_shared::time::Clock;

use crate::domain::{
    CollaboratorError, ConnectionId, Grid, IdentityVerifier, Participant, PusherChannel, Role,
    RoomRegistry, SpaceDirectory, SpaceId, Timestamp, Username,
};

use super::error::JoinError;

/// 参加要求（wire から受け取った生の値）
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub connection_id: ConnectionId,
    pub space_id: String,
    pub token: String,
}

/// 参加成功時の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedSpace {
    pub space_id: SpaceId,
    pub participant: Participant,
    /// 参加前から Room にいたメンバー
    pub snapshot: Vec<Participant>,
}

/// スペース参加のユースケース
pub struct JoinSpaceUseCase {
    identity: Arc<dyn IdentityVerifier>,
    directory: Arc<dyn SpaceDirectory>,
    registry: Arc<dyn RoomRegistry>,
    clock: Arc<dyn Clock>,
    grid: Grid,
    /// 各コラボレーター呼び出しの上限時間
    collaborator_timeout: Duration,
}

impl JoinSpaceUseCase {
    pub fn new(
        identity: Arc<dyn IdentityVerifier>,
        directory: Arc<dyn SpaceDirectory>,
        registry: Arc<dyn RoomRegistry>,
        clock: Arc<dyn Clock>,
        grid: Grid,
        collaborator_timeout: Duration,
    ) -> Self {
        Self {
            identity,
            directory,
            registry,
            clock,
            grid,
            collaborator_timeout,
        }
    }

    /// 参加処理を実行
    ///
    /// Registry への登録は全ての検証が成功した後の最後の手順であり、
    /// それ以前に失敗・キャンセルされた場合はロールバック不要。
    ///
    /// # Returns
    ///
    /// * `Ok(JoinedSpace)` - 参加成功（`space-joined` は既に自分のチャンネルへ送信済み）
    /// * `Err(JoinError)` - 参加失敗（登録なし）
    pub async fn execute(
        &self,
        request: JoinRequest,
        channel: PusherChannel,
    ) -> Result<JoinedSpace, JoinError> {
        // 1. トークン検証
        let user_id = self
            .bounded("token verification", self.identity.verify(&request.token))
            .await?;

        // 2. スペースの存在確認
        let space_id = SpaceId::new(request.space_id)
            .map_err(|_| JoinError::SpaceNotFound(String::new()))?;
        let exists = self
            .bounded("space lookup", self.directory.space_exists(&space_id))
            .await?;
        if !exists {
            return Err(JoinError::SpaceNotFound(space_id.into_string()));
        }

        // 3. ユーザー情報の解決（存在しなければ userId をユーザー名とし、最低権限のロール）
        let profile = self
            .bounded("user lookup", self.directory.lookup_user(&user_id))
            .await?;
        let (username, role) = match profile {
            Some(profile) => (profile.username, profile.role),
            None => {
                tracing::debug!("No profile for user '{}', using defaults", user_id);
                let username = Username::new(user_id.as_str().to_string()).map_err(|e| {
                    JoinError::Collaborator(CollaboratorError::Unavailable(e.to_string()))
                })?;
                (username, Role::default())
            }
        };

        // 4. スポーン位置を決めて Registry に登録
        let spawn = self.grid.random_position(&mut rand::rng());
        let participant = Participant::new(
            request.connection_id,
            user_id,
            username,
            role,
            spawn,
            Timestamp::new(self.clock.now_millis()),
        );
        let snapshot = self
            .registry
            .enter(&space_id, participant.clone(), channel)
            .await?;

        tracing::info!(
            "User '{}' joined space '{}' at {} ({} already present)",
            participant.user_id,
            space_id,
            spawn,
            snapshot.len()
        );

        Ok(JoinedSpace {
            space_id,
            participant,
            snapshot,
        })
    }

    /// コラボレーター呼び出しをタイムアウト付きで実行する（リトライなし）
    async fn bounded<T>(
        &self,
        what: &'static str,
        call: impl Future<Output = Result<T, CollaboratorError>>,
    ) -> Result<T, JoinError> {
        match tokio::time::timeout(self.collaborator_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(CollaboratorError::Unauthorized(reason))) => {
                Err(JoinError::AuthenticationFailed(reason))
            }
            Ok(Err(e)) => Err(JoinError::Collaborator(e)),
            Err(_) => Err(JoinError::Timeout(what)),
        }
    }
}
