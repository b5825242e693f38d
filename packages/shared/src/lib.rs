//! Utilities shared by the Gridroom crates.

pub mod logger;
pub mod time;
