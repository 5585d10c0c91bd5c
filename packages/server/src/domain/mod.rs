//! ドメイン層
//!
//! エンティティ・値オブジェクトと、外部への依存を抽象化した trait（Repository / MessagePusher / QuizContentClient）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod quiz_content;
pub mod repository;
pub mod value_object;

pub use entity::{
    AnswerOutcome, Participant, QuestionTimer, QuizSession, QuizState, Room, RoomPhase, RoomView,
    RoundPhase,
};
pub use error::{MessagePushError, QuizContentError, RepositoryError, RoomError, ValueObjectError};
pub use event::{PlayerSnapshot, RoomEvent};
pub use factory::RoomIdFactory;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use quiz_content::{NextQuestion, QuizContentClient, QuizInit};
pub use repository::{RoomRepository, SharedRoom};
pub use value_object::{
    ConnectionId, CourseId, PlayerName, Question, RoomId, SessionId, Timestamp,
};

#[cfg(test)]
pub use quiz_content::MockQuizContentClient;
