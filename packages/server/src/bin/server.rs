//! Gridroom realtime server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin gridroom-server -- --seed packages/server/seed.example.json
//! JWT_SECRET=... cargo run --bin gridroom-server -- --host 0.0.0.0 --port 3001
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use gridroom_server::{
    config::{
        DEFAULT_COLLABORATOR_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_PORT, RawConfig, ServerConfig,
    },
    domain::Grid,
    ui::Server,
};
use gridroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "gridroom-server")]
#[command(about = "Realtime room synchronization server for a shared 2D grid", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "GRIDROOM_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "GRIDROOM_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Shared HS256 secret for verifying join tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// JSON seed file with spaces, users and (without a JWT secret) static tokens
    #[arg(long, env = "GRIDROOM_SEED")]
    seed: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, env = "GRIDROOM_CANVAS_WIDTH", default_value_t = Grid::DEFAULT_CANVAS_WIDTH)]
    canvas_width: u32,

    /// Canvas height in pixels
    #[arg(long, env = "GRIDROOM_CANVAS_HEIGHT", default_value_t = Grid::DEFAULT_CANVAS_HEIGHT)]
    canvas_height: u32,

    /// Cell size in pixels
    #[arg(long, env = "GRIDROOM_CELL_SIZE", default_value_t = Grid::DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// Timeout for each identity / directory call during join, in milliseconds
    #[arg(long, env = "GRIDROOM_COLLABORATOR_TIMEOUT_MS", default_value_t = DEFAULT_COLLABORATOR_TIMEOUT_MS)]
    collaborator_timeout_ms: u64,
}

impl From<Args> for RawConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            canvas_width: args.canvas_width,
            canvas_height: args.canvas_height,
            cell_size: args.cell_size,
            collaborator_timeout_ms: args.collaborator_timeout_ms,
            jwt_secret: args.jwt_secret,
            seed_path: args.seed,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_PKG_NAME")], "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Config
    // 2. Collaborators, Registry and UseCases (AppState)
    // 3. Server
    let config = match ServerConfig::try_from(RawConfig::from(args)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Grid: {} x {} cells, collaborator timeout {:?}",
        config.grid.cols(),
        config.grid.rows(),
        config.collaborator_timeout
    );

    let state = match config.build_state(Arc::new(SystemClock)) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(state);
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
