//! Terminal client for the live quiz server.
//!
//! Reads slash commands from the prompt, sends them as realtime events, and
//! prints the room state, questions and final ranking pushed by the server.

mod command;
mod domain;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
