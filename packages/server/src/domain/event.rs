//! Room に向けて送信するイベント（ドメインモデル）
//!
//! ワイヤ形式への変換は Infrastructure 層（`dto::websocket`）が担当します。

use super::{ConnectionId, Participant, PlayerName, Question, RoomId};

/// クライアントに公開してよい参加者情報
///
/// `{id, name, score, ready}` 以外の内部情報は含めない。
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: ConnectionId,
    pub name: PlayerName,
    pub score: u32,
    pub ready: bool,
}

impl From<&Participant> for PlayerSnapshot {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.clone(),
            name: participant.name.clone(),
            score: participant.score,
            ready: participant.ready,
        }
    }
}

/// サーバーからクライアントへ送るイベント
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// createRoom への応答（作成者にのみ送る）
    RoomCreated { room_id: RoomId },
    /// 参加者とスコアのスナップショット
    RoomUpdate { players: Vec<PlayerSnapshot> },
    /// クイズ開始
    StartQuiz,
    /// 出題（`time_secs` は回答受付時間）
    Question { question: Question, time_secs: u64 },
    /// コーチからのメッセージ（励まし・解説・エラー通知）
    CoachMessage { text: String },
    /// 最終順位（スコア降順、同点は参加順）
    QuizEnd { ranking: Vec<PlayerSnapshot> },
}

impl RoomEvent {
    /// ログ出力用のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoomCreated { .. } => "roomCreated",
            Self::RoomUpdate { .. } => "roomUpdate",
            Self::StartQuiz => "startQuiz",
            Self::Question { .. } => "question",
            Self::CoachMessage { .. } => "coachMessage",
            Self::QuizEnd { .. } => "quizEnd",
        }
    }
}
