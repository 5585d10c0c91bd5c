//! Utilities shared by the Ynity live quiz server and client.

pub mod logger;
pub mod time;
