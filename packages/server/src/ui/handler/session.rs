//! Per-connection protocol state machine.
//!
//! `Unjoined` → `Joined` → `Terminated`。
//! 受信したテキストフレームごとに `handle_text` を呼び、`Err` が返ったら接続を閉じる。
//! 接続終了時（正常・異常を問わず）には必ず `disconnect` を呼ぶ。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 状態ごとに許可されるメッセージと、違反時の終了
//! - 参加前・参加後の切断処理
//!
//! ### どのような状況を想定しているか
//! - 正常系：join → move / chat → disconnect
//! - 異常系：参加前の move、二重 join、不正 JSON、参加失敗
//! - エッジケース：未知の type（無視して継続）

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, Position, PusherChannel, SpaceId, UserId, Username},
    infrastructure::dto::websocket::{ClientMessage, JoinPayload, decode_client_message},
    ui::state::AppState,
    usecase::{JoinRequest, SessionError},
};

/// 参加済み接続が保持する情報（正規のレコードは Registry が持つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub space_id: SpaceId,
    pub user_id: UserId,
    pub username: Username,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Unjoined,
    Joined(Membership),
    Terminated,
}

pub struct ConnectionSession {
    app: Arc<AppState>,
    connection_id: ConnectionId,
    /// 自分宛ての送信キュー（join 時に Registry へ渡す）
    channel: PusherChannel,
    phase: Phase,
}

impl ConnectionSession {
    pub fn new(app: Arc<AppState>, connection_id: ConnectionId, channel: PusherChannel) -> Self {
        Self {
            app,
            connection_id,
            channel,
            phase: Phase::Unjoined,
        }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// 受信したテキストフレームを 1 つ処理する
    ///
    /// 未知の `type` は無視して `Ok(())` を返す。
    pub async fn handle_text(&mut self, text: &str) -> Result<(), SessionError> {
        if self.phase == Phase::Terminated {
            return Err(SessionError::Terminated);
        }

        let message = match decode_client_message(text) {
            Ok(Some(message)) => message,
            Ok(None) => {
                tracing::debug!(
                    "Ignoring message of unknown type from connection '{}'",
                    self.connection_id
                );
                return Ok(());
            }
            Err(e) => return Err(SessionError::Malformed(e.to_string())),
        };

        match message {
            ClientMessage::Join(payload) => self.join(payload).await,
            ClientMessage::Move(payload) => {
                let membership = self.membership("move")?;
                self.app
                    .move_participant_usecase
                    .execute(
                        &membership.space_id,
                        &self.connection_id,
                        Position::new(payload.x, payload.y),
                    )
                    .await?;
                Ok(())
            }
            ClientMessage::Chat(payload) => {
                let membership = self.membership("chat")?;
                self.app
                    .send_chat_usecase
                    .execute(
                        &membership.space_id,
                        &self.connection_id,
                        membership.user_id.clone(),
                        membership.username.clone(),
                        payload.message,
                    )
                    .await;
                Ok(())
            }
        }
    }

    /// 接続終了時の後始末（2 回目以降は何もしない）
    pub async fn disconnect(&mut self) {
        let phase = std::mem::replace(&mut self.phase, Phase::Terminated);
        if let Phase::Joined(membership) = phase {
            self.app
                .leave_space_usecase
                .execute(&self.connection_id, &membership.space_id)
                .await;
        }
    }

    async fn join(&mut self, payload: JoinPayload) -> Result<(), SessionError> {
        if matches!(self.phase, Phase::Joined(_)) {
            return Err(SessionError::AlreadyJoined);
        }

        let request = JoinRequest {
            connection_id: self.connection_id.clone(),
            space_id: payload.space_id,
            token: payload.token,
        };
        let joined = self
            .app
            .join_space_usecase
            .execute(request, self.channel.clone())
            .await?;

        // Registry 登録と同じポーリング内で状態を更新する
        self.phase = Phase::Joined(Membership {
            space_id: joined.space_id,
            user_id: joined.participant.user_id,
            username: joined.participant.username,
        });
        Ok(())
    }

    fn membership(&self, message_type: &'static str) -> Result<&Membership, SessionError> {
        match &self.phase {
            Phase::Joined(membership) => Ok(membership),
            Phase::Unjoined => Err(SessionError::NotJoined(message_type)),
            Phase::Terminated => Err(SessionError::Terminated),
        }
    }
}
