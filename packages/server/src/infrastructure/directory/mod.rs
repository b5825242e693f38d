//! Persistence collaborator implementations
//!
//! - `seed`: JSON seed file (spaces, users, development tokens)
//! - `inmemory`: directory backed by the seed data

pub mod inmemory;
pub mod seed;

pub use inmemory::InMemorySpaceDirectory;
pub use seed::{SeedError, SeedFile};
