//! Data Transfer Objects (DTOs) for the live quiz server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: realtime channel events
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
