//! InMemory Repository 実装

pub mod room;

pub use room::{InMemoryRoomRepository, RoomIdGenerator};
