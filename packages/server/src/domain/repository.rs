//! Room Registry trait 定義
//!
//! ドメイン層が必要とする Room メンバーシップ管理とブロードキャストのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 排他制御
//!
//! 同じ Room に対する変更（add / remove）と、ブロードキャスト対象やスナップショットを
//! 構築するための読み取りは互いに排他的でなければなりません。
//! 複合操作（`enter` / `relocate` / `leave`）は、一連の手順を 1 回の排他区間で行います。

use async_trait::async_trait;

use super::{
    ConnectionId, Grid, MoveOutcome, Participant, Position, PusherChannel, RegistryError,
    RoomSummary, ServerEvent, SpaceId,
};

/// Room Registry trait
///
/// 未知の Room ID に対する操作はすべて no-op であり、エラーにはならない。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 参加者を Room に追加する（Room がなければ作成する）
    ///
    /// 同じ接続 ID が既に存在する場合は上書きせず `DuplicateParticipant` を返す。
    async fn add(
        &self,
        space_id: &SpaceId,
        participant: Participant,
        channel: PusherChannel,
    ) -> Result<(), RegistryError>;

    /// 参加者を Room から削除する（存在しなければ no-op）
    ///
    /// 最後の参加者が抜けた Room は破棄される。
    async fn remove(&self, connection_id: &ConnectionId, space_id: &SpaceId)
    -> Option<Participant>;

    /// `sender` 以外の全メンバーにイベントを配信し、配信できた件数を返す
    async fn broadcast(
        &self,
        event: ServerEvent,
        sender: Option<&ConnectionId>,
        space_id: &SpaceId,
    ) -> usize;

    /// 現在のメンバー一覧（参加順）
    async fn list(&self, space_id: &SpaceId) -> Vec<Participant>;

    /// 参加処理を 1 回の排他区間で行う
    ///
    /// 1. 自分を含まない現在のメンバーのスナップショットを取得
    /// 2. `space-joined` を自分のチャンネルへ送信
    /// 3. 自分を登録
    /// 4. 他のメンバーへ `user-joined` をブロードキャスト
    ///
    /// 戻り値はスナップショット。
    async fn enter(
        &self,
        space_id: &SpaceId,
        participant: Participant,
        channel: PusherChannel,
    ) -> Result<Vec<Participant>, RegistryError>;

    /// 移動要求を権威位置に対して検証し、結果を反映する
    ///
    /// 受理: 位置を更新し、自分以外へ `movement` をブロードキャスト。
    /// 拒否: 自分にだけ `movement-rejected`（現在位置）を返す。
    async fn relocate(
        &self,
        space_id: &SpaceId,
        connection_id: &ConnectionId,
        proposed: Position,
        grid: Grid,
    ) -> Result<MoveOutcome, RegistryError>;

    /// 退出処理：残りのメンバーへ `user-left` を配信してから登録解除する
    async fn leave(&self, connection_id: &ConnectionId, space_id: &SpaceId)
    -> Option<Participant>;

    /// アクティブな Room の一覧
    async fn rooms(&self) -> Vec<RoomSummary>;
}
