//! Live multiplayer quiz server library.
//!
//! Rooms gather players over WebSocket, run a ready-check, then pace quiz
//! questions fetched from an external content service and keep score.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
