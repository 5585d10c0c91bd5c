//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError};

/// Room 作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Room 参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// 指定された Room が存在しない（クライアントには通知しない）
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    /// すでにこの Room に参加している
    #[error("connection is already in room '{0}'")]
    AlreadyInRoom(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// 準備完了のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadyError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// 回答のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    /// 送信者がどの Room にも参加していない
    #[error("connection '{0}' is not in any room")]
    NotInRoom(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// 退出のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    /// 送信者がどの Room にも参加していない
    #[error("connection '{0}' is not in any room")]
    NotInRoom(String),
}

/// Room 詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
