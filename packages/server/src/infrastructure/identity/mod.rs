//! Identity collaborator implementations
//!
//! - `jwt`: HS256 JWT verification with the account service's shared secret
//! - `static_tokens`: fixed token table loaded from the seed file (development / tests)

pub mod jwt;
pub mod static_tokens;

pub use jwt::JwtIdentityVerifier;
pub use static_tokens::StaticIdentityVerifier;
