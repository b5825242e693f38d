//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{CollaboratorError, RegistryError};

/// 参加処理のエラー
///
/// いずれの場合も接続は応答なしで切断され、Registry への登録は行われない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// トークンが不正・期限切れ・検証不能
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// 存在しないスペースへの参加
    #[error("space '{0}' not found")]
    SpaceNotFound(String),

    /// コラボレーターの呼び出しがタイムアウトした
    #[error("{0} timed out")]
    Timeout(&'static str),

    /// コラボレーターが利用できない
    #[error("collaborator error: {0}")]
    Collaborator(CollaboratorError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Room 参照のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetSpaceDetailError {
    #[error("space '{0}' has no active room")]
    RoomNotFound(String),
}

/// 接続を終了させるプロトコル違反・参加失敗
///
/// いずれの場合もクライアントへは何も返さずに接続を閉じる。
#[derive(Debug, Error)]
pub enum SessionError {
    /// JSON として不正、または必須フィールドの欠落
    #[error("malformed message: {0}")]
    Malformed(String),

    /// 参加前に join 以外のメッセージを受信した
    #[error("'{0}' received before join")]
    NotJoined(&'static str),

    /// 参加済みの接続で再度 join を受信した
    #[error("join received while already joined")]
    AlreadyJoined,

    #[error("connection already terminated")]
    Terminated,

    #[error("join rejected: {0}")]
    JoinRejected(#[from] JoinError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
