//! Token table identity verifier.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{CollaboratorError, IdentityVerifier, UserId};

/// Maps opaque tokens to user ids.
#[derive(Debug, Default)]
pub struct StaticIdentityVerifier {
    tokens: HashMap<String, UserId>,
}

impl StaticIdentityVerifier {
    pub fn new(tokens: HashMap<String, UserId>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, CollaboratorError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| CollaboratorError::Unauthorized("unknown token".to_string()))
    }
}
