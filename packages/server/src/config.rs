//! Server configuration.
//!
//! The binary parses CLI arguments (with environment fallbacks) and turns them into a
//! validated [`ServerConfig`], which then assembles the [`AppState`].

use std::{path::PathBuf, sync::Arc, time::Duration};

use gridroom_shared::time::Clock;
use thiserror::Error;

use crate::{
    domain::{Grid, IdentityVerifier, ValueObjectError},
    infrastructure::{
        directory::{InMemorySpaceDirectory, SeedError, SeedFile},
        identity::{JwtIdentityVerifier, StaticIdentityVerifier},
        registry::InMemoryRoomRegistry,
    },
    ui::AppState,
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_COLLABORATOR_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] ValueObjectError),

    #[error("collaborator timeout must be greater than zero")]
    ZeroTimeout,

    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// Raw values as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
    pub host: String,
    pub port: u16,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    pub collaborator_timeout_ms: u64,
    pub jwt_secret: Option<String>,
    pub seed_path: Option<PathBuf>,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub grid: Grid,
    /// Upper bound for each identity / directory call during join
    pub collaborator_timeout: Duration,
    /// HS256 secret; when absent, tokens are looked up in the seed file
    pub jwt_secret: Option<String>,
    pub seed_path: Option<PathBuf>,
}

impl TryFrom<RawConfig> for ServerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let grid = Grid::from_canvas(raw.canvas_width, raw.canvas_height, raw.cell_size)?;
        if raw.collaborator_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            host: raw.host,
            port: raw.port,
            grid,
            collaborator_timeout: Duration::from_millis(raw.collaborator_timeout_ms),
            jwt_secret: raw.jwt_secret.filter(|secret| !secret.is_empty()),
            seed_path: raw.seed_path,
        })
    }
}

impl ServerConfig {
    /// Convenience: `host:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the seed file, or an empty seed when no path is configured.
    pub fn load_seed(&self) -> Result<SeedFile, ConfigError> {
        match &self.seed_path {
            Some(path) => Ok(SeedFile::load(path)?),
            None => Ok(SeedFile::default()),
        }
    }

    /// Assemble the collaborators, the registry and every UseCase.
    pub fn build_state(&self, clock: Arc<dyn Clock>) -> Result<AppState, ConfigError> {
        let seed = self.load_seed()?;

        let identity: Arc<dyn IdentityVerifier> = match &self.jwt_secret {
            Some(secret) => {
                tracing::info!("Verifying tokens as HS256 JWT");
                Arc::new(JwtIdentityVerifier::new(secret.as_bytes(), clock.clone()))
            }
            None => {
                let tokens = seed.token_table()?;
                tracing::warn!(
                    "No JWT secret configured, accepting {} static token(s) from the seed file",
                    tokens.len()
                );
                Arc::new(StaticIdentityVerifier::new(tokens))
            }
        };

        let directory = InMemorySpaceDirectory::from_seed(&seed)?;
        tracing::info!(
            "Space directory loaded: {} space(s), {} user(s)",
            directory.space_count(),
            directory.user_count()
        );

        Ok(AppState::new(
            Arc::new(InMemoryRoomRegistry::new()),
            identity,
            Arc::new(directory),
            clock,
            self.grid,
            self.collaborator_timeout,
        ))
    }
}
