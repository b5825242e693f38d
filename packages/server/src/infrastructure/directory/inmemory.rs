//! InMemory Space Directory 実装
//!
//! シードファイルから読み込んだスペースとユーザー情報を保持します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::domain::{CollaboratorError, SpaceDirectory, SpaceId, UserId, UserProfile};

use super::seed::{SeedError, SeedFile};

#[derive(Debug, Default)]
pub struct InMemorySpaceDirectory {
    spaces: HashSet<SpaceId>,
    users: HashMap<UserId, UserProfile>,
}

impl InMemorySpaceDirectory {
    pub fn new(
        spaces: impl IntoIterator<Item = SpaceId>,
        users: HashMap<UserId, UserProfile>,
    ) -> Self {
        Self {
            spaces: spaces.into_iter().collect(),
            users,
        }
    }

    pub fn from_seed(seed: &SeedFile) -> Result<Self, SeedError> {
        Ok(Self::new(seed.space_ids()?, seed.profiles()?))
    }

    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl SpaceDirectory for InMemorySpaceDirectory {
    async fn space_exists(&self, space_id: &SpaceId) -> Result<bool, CollaboratorError> {
        Ok(self.spaces.contains(space_id))
    }

    async fn lookup_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, CollaboratorError> {
        Ok(self.users.get(user_id).cloned())
    }
}
