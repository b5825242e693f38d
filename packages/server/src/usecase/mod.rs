//! UseCase layer
//!
//! 接続ハンドラから呼ばれるアプリケーションロジック。
//! Registry と外部コラボレーターには trait 経由でのみ依存します。

pub mod error;
pub mod get_spaces;
pub mod join_space;
pub mod leave_space;
pub mod move_participant;
pub mod send_chat;

pub use error::{GetSpaceDetailError, JoinError, SessionError};
pub use get_spaces::{GetSpaceDetailUseCase, GetSpacesUseCase};
pub use join_space::{JoinRequest, JoinSpaceUseCase, JoinedSpace};
pub use leave_space::LeaveSpaceUseCase;
pub use move_participant::MoveParticipantUseCase;
pub use send_chat::SendChatUseCase;
