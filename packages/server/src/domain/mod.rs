//! Domain layer
//!
//! 値オブジェクト・エンティティ・ドメインイベント、および移動判定などの純粋なロジック、
//! ならびに外部層が実装するインターフェース（trait）を定義します。

pub mod collaborator;
pub mod entity;
pub mod error;
pub mod event;
pub mod movement;
pub mod repository;
pub mod value_object;

pub use collaborator::{IdentityVerifier, SpaceDirectory};
pub use entity::{Participant, RoomSummary, UserProfile};
pub use error::{CollaboratorError, RegistryError, ValueObjectError};
pub use event::{PusherChannel, ServerEvent};
pub use movement::{MoveOutcome, MoveRejection, validate_move};
pub use repository::RoomRegistry;
pub use value_object::{ConnectionId, Grid, Position, Role, SpaceId, Timestamp, UserId, Username};
