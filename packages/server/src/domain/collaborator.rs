//! External collaborators needed by the join flow.
//!
//! Token issuance and the storage of spaces and users live outside this server;
//! these traits are the only contact points.

use async_trait::async_trait;

use super::{CollaboratorError, SpaceId, UserId, UserProfile};

/// Identity collaborator: turns a token into a user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<UserId, CollaboratorError>;
}

/// Persistence collaborator: spaces and user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpaceDirectory: Send + Sync {
    async fn space_exists(&self, space_id: &SpaceId) -> Result<bool, CollaboratorError>;

    /// `Ok(None)` when the user has no profile.
    async fn lookup_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, CollaboratorError>;
}
