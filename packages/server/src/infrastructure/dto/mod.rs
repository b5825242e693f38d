//! Data Transfer Objects (DTOs) for the Gridroom server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs and framing (the protocol codec)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
