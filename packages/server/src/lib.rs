//! Gridroom realtime server.
//!
//! Participants join a space over WebSocket, move one cell at a time on a shared grid
//! and chat with everyone else in the same room.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
