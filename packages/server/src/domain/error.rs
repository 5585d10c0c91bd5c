//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// 空文字は不可
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// Room ID の形式が不正
    #[error("invalid room id: '{0}'")]
    InvalidRoomId(String),
}

/// Room エンティティの不変条件違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// 同じ接続がすでに参加している
    #[error("connection '{0}' is already in the room")]
    DuplicateParticipant(String),

    /// 参加者が見つからない
    #[error("connection '{0}' is not a participant of the room")]
    ParticipantNotFound(String),

    /// 最後の参加者が抜けて削除済みの Room
    #[error("room '{0}' has been retired")]
    Retired(String),
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Room が存在しない
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    /// 衝突しない Room ID を生成できなかった
    #[error("could not allocate a unique room id after {0} attempts")]
    RoomIdExhausted(usize),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のクライアントが登録されていない
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// イベントのシリアライズに失敗
    #[error("failed to serialize event: {0}")]
    Serialize(String),
}

/// クイズコンテンツサービスのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizContentError {
    /// ネットワークエラーなど、レスポンスを得られなかった
    #[error("content service request failed: {0}")]
    Request(String),

    /// 成功以外のステータスコード
    #[error("content service responded with status {0}")]
    Status(u16),

    /// レスポンスボディを解釈できない
    #[error("malformed content service response: {0}")]
    Decode(String),

    /// 問題が 1 問も返ってこなかった
    #[error("content service returned no questions")]
    EmptyQuestionSet,
}
