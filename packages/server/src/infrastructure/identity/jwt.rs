//! HS256 JWT identity verifier.
//!
//! Tokens are issued by the account service with the shared secret; this server only
//! verifies them. The `userId` claim is required, `exp` (seconds) is honored when present.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use gridroom_shared::time::Clock;

use crate::domain::{CollaboratorError, IdentityVerifier, UserId};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Deserialize)]
struct Header {
    alg: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: Option<String>,
    exp: Option<i64>,
}

fn unauthorized(reason: &str) -> CollaboratorError {
    CollaboratorError::Unauthorized(reason.to_string())
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str, what: &str) -> Result<T, CollaboratorError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| unauthorized(&format!("invalid {} encoding", what)))?;
    serde_json::from_slice(&bytes).map_err(|_| unauthorized(&format!("invalid {}", what)))
}

pub struct JwtIdentityVerifier {
    secret: Vec<u8>,
    clock: Arc<dyn Clock>,
}

impl JwtIdentityVerifier {
    pub fn new(secret: impl Into<Vec<u8>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: secret.into(),
            clock,
        }
    }

    fn verify_token(&self, token: &str) -> Result<UserId, CollaboratorError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(unauthorized("token is not a JWT"));
        };

        let header: Header = decode_segment(header, "header")?;
        if header.alg != "HS256" {
            return Err(unauthorized("unsupported algorithm"));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| unauthorized("invalid signature encoding"))?;
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| CollaboratorError::Unavailable(e.to_string()))?;
        mac.update(signing_input(token).as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| unauthorized("signature mismatch"))?;

        let claims: Claims = decode_segment(payload, "claims")?;
        if let Some(exp) = claims.exp
            && exp.saturating_mul(1000) <= self.clock.now_millis()
        {
            return Err(unauthorized("token expired"));
        }

        let user_id = claims.user_id.ok_or_else(|| unauthorized("missing userId claim"))?;
        UserId::new(user_id).map_err(|_| unauthorized("empty userId claim"))
    }
}

/// `header.payload` part of the token
fn signing_input(token: &str) -> &str {
    token.rsplit_once('.').map_or(token, |(input, _)| input)
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, CollaboratorError> {
        self.verify_token(token)
    }
}
