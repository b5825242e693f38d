//! Seed file for the in-process collaborators.
//!
//! ```json
//! {
//!   "spaces": ["lobby"],
//!   "users": [{"userId": "u-1", "username": "alice", "role": "admin"}],
//!   "tokens": {"dev-token-alice": "u-1"}
//! }
//! ```
//!
//! Every section is optional.

use std::{collections::HashMap, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Role, SpaceId, UserId, UserProfile, Username, ValueObjectError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid seed entry: {0}")]
    Invalid(#[from] ValueObjectError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub spaces: Vec<String>,
    pub users: Vec<SeedUser>,
    pub tokens: HashMap<String, String>,
}

impl SeedFile {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn space_ids(&self) -> Result<Vec<SpaceId>, SeedError> {
        Ok(self
            .spaces
            .iter()
            .cloned()
            .map(SpaceId::new)
            .collect::<Result<_, _>>()?)
    }

    pub fn profiles(&self) -> Result<HashMap<UserId, UserProfile>, SeedError> {
        let mut profiles = HashMap::with_capacity(self.users.len());
        for user in &self.users {
            let profile = UserProfile {
                username: Username::new(user.username.clone())?,
                role: user
                    .role
                    .as_deref()
                    .map(Role::from_str_lossy)
                    .unwrap_or_default(),
            };
            profiles.insert(UserId::new(user.user_id.clone())?, profile);
        }
        Ok(profiles)
    }

    pub fn token_table(&self) -> Result<HashMap<String, UserId>, SeedError> {
        let mut table = HashMap::with_capacity(self.tokens.len());
        for (token, user_id) in &self.tokens {
            table.insert(token.clone(), UserId::new(user_id.clone())?);
        }
        Ok(table)
    }
}
