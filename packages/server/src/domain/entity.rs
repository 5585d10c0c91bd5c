//! エンティティ定義
//!
//! - `Participant`: Room の参加者（接続 1 本に対応）
//! - `Room`: 参加者・準備状態・進行中のクイズセッションの集約
//! - `QuizSession`: 1 試合分の出題状態（Room が排他的に所有）

use std::{collections::HashSet, fmt};

use tokio::task::AbortHandle;

use super::{
    ConnectionId, CourseId, PlayerName, PlayerSnapshot, Question, RoomError, RoomId, SessionId,
    Timestamp,
};

/// Room の参加者
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// 接続 ID（チャンネルの寿命と一致）
    pub id: ConnectionId,
    /// 表示名
    pub name: PlayerName,
    /// 現在のセッションでの累計スコア
    pub score: u32,
    /// 準備完了フラグ
    pub ready: bool,
    /// 参加時刻
    pub joined_at: Timestamp,
}

impl Participant {
    /// スコア 0・未準備の参加者を作成
    pub fn new(id: ConnectionId, name: PlayerName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            score: 0,
            ready: false,
            joined_at,
        }
    }
}

/// 回答受付時間のタイマー
///
/// drop すると待機中のタスクを中断する。セッションを破棄すればタイマーも必ず止まる。
pub struct QuestionTimer(AbortHandle);

impl QuestionTimer {
    pub fn new(handle: AbortHandle) -> Self {
        Self(handle)
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl fmt::Debug for QuestionTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionTimer")
            .field("finished", &self.0.is_finished())
            .finish()
    }
}

/// 1 問ごとの進行フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// コンテンツサービスから問題を取得中（回答は受け付けない）
    Fetching,
    /// 出題済みで回答受付中
    AcceptingAnswers,
}

/// クイズセッション
#[derive(Debug)]
pub struct QuizSession {
    id: SessionId,
    questions: Vec<Question>,
    current_index: usize,
    answered_this_round: HashSet<ConnectionId>,
    coach_message: Option<String>,
    phase: RoundPhase,
    timer: Option<QuestionTimer>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, coach_message: Option<String>) -> Self {
        Self {
            id: SessionId::generate(),
            questions,
            current_index: 0,
            answered_this_round: HashSet::new(),
            coach_message,
            phase: RoundPhase::Fetching,
            timer: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn coach_message(&self) -> Option<&str> {
        self.coach_message.as_deref()
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// 全問出題し終えたか
    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn is_accepting_answers(&self) -> bool {
        self.phase == RoundPhase::AcceptingAnswers
    }

    /// この問題ですでに得点した接続か
    pub fn has_answered(&self, id: &ConnectionId) -> bool {
        self.answered_this_round.contains(id)
    }

    /// 問題の取得を開始（取得中は回答を受け付けない）
    pub fn begin_fetch(&mut self) {
        self.phase = RoundPhase::Fetching;
    }

    /// 出題して回答受付を開始
    pub fn open_round(&mut self) {
        self.answered_this_round.clear();
        self.phase = RoundPhase::AcceptingAnswers;
    }

    /// 回答受付時間のタイマーを設定（前のタイマーは破棄される）
    pub fn arm_timer(&mut self, timer: QuestionTimer) {
        self.timer = Some(timer);
    }

    /// 次の問題へ進める（インデックスは 1 ずつ単調増加）
    pub fn advance(&mut self) {
        self.timer = None;
        self.current_index += 1;
        self.phase = RoundPhase::Fetching;
    }

    fn record_correct(&mut self, id: &ConnectionId) -> bool {
        self.answered_this_round.insert(id.clone())
    }
}

/// Room のクイズ進行状態
#[derive(Debug, Default)]
pub enum QuizState {
    /// 準備待ち
    #[default]
    Idle,
    /// 全員準備完了、問題セットを取得中
    Starting,
    /// 出題中
    Running(QuizSession),
}

/// 外部公開用の Room のフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    Waiting,
    Starting,
    InQuiz,
}

impl RoomPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Starting => "starting",
            Self::InQuiz => "inQuiz",
        }
    }
}

/// 回答の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// 正解として加点した（`score` は加点後の合計）
    Scored { score: u32 },
    /// 不正解（スコア変化なし）
    Incorrect,
    /// この問題ではすでに得点済み
    AlreadyAnswered,
    /// 回答受付中の問題がない
    NotAccepting,
}

/// HTTP API などで参照するための Room の読み取り専用ビュー
#[derive(Debug, Clone, PartialEq)]
pub struct RoomView {
    pub id: RoomId,
    pub course_id: Option<CourseId>,
    pub phase: RoomPhase,
    pub current_question: Option<usize>,
    pub total_questions: Option<usize>,
    pub participants: Vec<Participant>,
    pub created_at: Timestamp,
}

/// Room エンティティ
///
/// ## 不変条件
///
/// - 参加者は接続 ID で一意、並び順は参加順
/// - `course_id` は最初に指定された値で固定され、以後変更されない
/// - クイズセッションは同時に高々 1 つ
/// - 参加者 0 人の Room は retire され、以後どの操作も受け付けない
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    pub created_at: Timestamp,
    participants: Vec<Participant>,
    course_id: Option<CourseId>,
    quiz: QuizState,
    retired: bool,
}

impl Room {
    /// 作成者 1 人を含む Room を作成
    pub fn new(id: RoomId, creator: Participant, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            participants: vec![creator],
            course_id: None,
            quiz: QuizState::Idle,
            retired: false,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: &ConnectionId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.participant(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// ブロードキャスト対象（参加中の全接続）
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }

    pub fn course_id(&self) -> Option<&CourseId> {
        self.course_id.as_ref()
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn quiz(&self) -> &QuizState {
        &self.quiz
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.quiz {
            QuizState::Running(session) => Some(session),
            _ => None,
        }
    }

    /// 指定 ID のセッションが現在も進行中ならその可変参照を返す
    pub fn active_session_mut(&mut self, session_id: SessionId) -> Option<&mut QuizSession> {
        if self.retired {
            return None;
        }
        match &mut self.quiz {
            QuizState::Running(session) if session.id == session_id => Some(session),
            _ => None,
        }
    }

    pub fn phase(&self) -> RoomPhase {
        match self.quiz {
            QuizState::Idle => RoomPhase::Waiting,
            QuizState::Starting => RoomPhase::Starting,
            QuizState::Running(_) => RoomPhase::InQuiz,
        }
    }

    /// 参加者を追加（参加順の末尾）
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.retired {
            return Err(RoomError::Retired(self.id.as_str().to_string()));
        }
        if self.contains(&participant.id) {
            return Err(RoomError::DuplicateParticipant(
                participant.id.into_string(),
            ));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// 参加者を削除（存在しなければ何もしない）
    pub fn remove_participant(&mut self, id: &ConnectionId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| &p.id == id)?;
        Some(self.participants.remove(index))
    }

    /// 準備完了にする。コース ID は未設定の場合のみ採用する。
    pub fn mark_ready(
        &mut self,
        id: &ConnectionId,
        course_id: Option<CourseId>,
    ) -> Result<(), RoomError> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| RoomError::ParticipantNotFound(id.as_str().to_string()))?;
        participant.ready = true;

        if self.course_id.is_none() {
            self.course_id = course_id;
        }
        Ok(())
    }

    /// 2 人以上かつ全員が準備完了か
    pub fn all_ready(&self) -> bool {
        self.participants.len() >= 2 && self.participants.iter().all(|p| p.ready)
    }

    /// 開始条件を満たしていれば `Starting` に遷移して true を返す
    pub fn try_begin_start(&mut self) -> bool {
        if self.retired || !matches!(self.quiz, QuizState::Idle) || !self.all_ready() {
            return false;
        }
        self.quiz = QuizState::Starting;
        true
    }

    /// 問題セットの取得に失敗したので待機状態に戻す
    pub fn abort_start(&mut self) {
        if matches!(self.quiz, QuizState::Starting) {
            self.quiz = QuizState::Idle;
        }
    }

    /// セッションを開始する。全員のスコアは 0 に戻る。
    pub fn start_session(&mut self, session: QuizSession) -> SessionId {
        let session_id = session.id;
        for participant in &mut self.participants {
            participant.score = 0;
        }
        self.quiz = QuizState::Running(session);
        session_id
    }

    /// 回答を処理する
    ///
    /// 正解かつこの問題で未得点の場合のみ `points` を加算する。
    pub fn record_answer(
        &mut self,
        id: &ConnectionId,
        correct: bool,
        points: u32,
    ) -> Result<AnswerOutcome, RoomError> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| RoomError::ParticipantNotFound(id.as_str().to_string()))?;

        let session = match &mut self.quiz {
            QuizState::Running(session) if session.is_accepting_answers() => session,
            _ => return Ok(AnswerOutcome::NotAccepting),
        };
        if !correct {
            return Ok(AnswerOutcome::Incorrect);
        }
        if !session.record_correct(id) {
            return Ok(AnswerOutcome::AlreadyAnswered);
        }

        participant.score = participant.score.saturating_add(points);
        Ok(AnswerOutcome::Scored {
            score: participant.score,
        })
    }

    /// 参加者のスナップショット（参加順）
    pub fn snapshot(&self) -> Vec<PlayerSnapshot> {
        self.participants.iter().map(PlayerSnapshot::from).collect()
    }

    /// スコア降順の順位。同点は参加順を保つ（安定ソート）。
    pub fn ranking(&self) -> Vec<PlayerSnapshot> {
        let mut ranking = self.snapshot();
        ranking.sort_by(|a, b| b.score.cmp(&a.score));
        ranking
    }

    /// セッションを終了して最終順位を返す
    pub fn finish_session(&mut self) -> Vec<PlayerSnapshot> {
        let ranking = self.ranking();
        self.reset_after_session();
        ranking
    }

    /// 順位を出さずにセッションを打ち切る
    pub fn halt_session(&mut self) {
        self.reset_after_session();
    }

    fn reset_after_session(&mut self) {
        self.quiz = QuizState::Idle;
        for participant in &mut self.participants {
            participant.ready = false;
        }
    }

    /// Room を廃止する。進行中のセッションとタイマーも破棄される。
    pub fn retire(&mut self) {
        self.retired = true;
        self.quiz = QuizState::Idle;
    }

    pub fn view(&self) -> RoomView {
        let session = self.session();
        RoomView {
            id: self.id.clone(),
            course_id: self.course_id.clone(),
            phase: self.phase(),
            current_question: session.map(|s| s.current_index()),
            total_questions: session.map(|s| s.total_questions()),
            participants: self.participants.clone(),
            created_at: self.created_at,
        }
    }
}
