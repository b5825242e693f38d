//! Domain errors.

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid grid: canvas {width}x{height} with cell size {cell_size} yields no cells")]
    InvalidGrid {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}

/// Room Registry のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 同じ接続 ID の参加者が既に Room に存在する
    #[error("participant '{0}' is already registered in the room")]
    DuplicateParticipant(String),

    /// 参加者が Room に存在しない
    #[error("participant '{0}' is not a member of the room")]
    NotMember(String),
}

/// 外部コラボレーター（認証・永続化）の呼び出しエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// トークンが不正・期限切れ・検証不能
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// コラボレーター自体が利用できない
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}
