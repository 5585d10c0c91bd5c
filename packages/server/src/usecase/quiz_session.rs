//! UseCase: クイズセッションの進行
//!
//! 全員の準備完了から、1 問ずつの出題・回答受付時間・最終順位の配信までを駆動するステートマシン。
//!
//! ```text
//! Idle ──(全員準備完了)──▶ Starting ──(init 成功)──▶ Running(0) ──▶ Running(1) ──▶ … ──▶ Idle
//!   ▲                         │                          │
//!   └────(init 失敗)──────────┘                          └──(next 失敗: 打ち切り)──▶ Idle
//! ```
//!
//! ## 並行性
//!
//! - Room の状態は Room ごとのロック内でのみ変更する
//! - コンテンツサービスの呼び出し中はロックを手放す。その間 Room は `Fetching` で、回答は無視される
//! - ロックを取り直した後、セッション ID と問題インデックスを照合してから結果を反映する

use std::sync::Arc;

use crate::{
    config::LiveQuizConfig,
    domain::{
        MessagePusher, NextQuestion, QuestionTimer, QuizContentClient, QuizContentError,
        QuizSession, QuizState, Room, RoomEvent, SessionId, SharedRoom,
    },
};

use super::notify::{broadcast_room_update, broadcast_to_room};

/// init 失敗時に Room へ送るメッセージ
pub const QUIZ_LOAD_FAILED_MESSAGE: &str =
    "The quiz could not be loaded. Please get ready again to retry.";

/// next 失敗で打ち切った時に Room へ送るメッセージ
pub const QUIZ_INTERRUPTED_MESSAGE: &str =
    "The quiz was interrupted: the next question could not be loaded.";

/// セッション開始の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// 開始して最初の問題の配信まで進んだ
    Started,
    /// 問題セットを取得できなかった（Room は待機状態に戻る）
    Failed(QuizContentError),
    /// 取得中に Room が削除されたなど、開始の前提が崩れた
    Abandoned,
}

/// クイズセッションの進行役
pub struct QuizSessionRunner {
    content_client: Arc<dyn QuizContentClient>,
    message_pusher: Arc<dyn MessagePusher>,
    config: LiveQuizConfig,
}

impl QuizSessionRunner {
    pub fn new(
        content_client: Arc<dyn QuizContentClient>,
        message_pusher: Arc<dyn MessagePusher>,
        config: LiveQuizConfig,
    ) -> Self {
        Self {
            content_client,
            message_pusher,
            config,
        }
    }

    /// `Starting` の Room でセッションを開始する
    ///
    /// 問題セットを取得し、`startQuiz` を配信して最初の問題を出題する。
    pub async fn start(self: &Arc<Self>, shared: SharedRoom) -> StartOutcome {
        let course_id = {
            let room = shared.lock().await;
            if room.is_retired() || !matches!(room.quiz(), QuizState::Starting) {
                return StartOutcome::Abandoned;
            }
            room.course_id().cloned()
        };

        let init = match self.content_client.init(course_id).await {
            Ok(init) if init.questions.is_empty() => Err(QuizContentError::EmptyQuestionSet),
            other => other,
        };

        let mut room = shared.lock().await;
        if room.is_retired() || !matches!(room.quiz(), QuizState::Starting) {
            tracing::debug!(
                "Room '{}' changed while loading questions, dropping the result",
                room.id
            );
            return StartOutcome::Abandoned;
        }

        let init = match init {
            Ok(init) => init,
            Err(e) => {
                tracing::warn!("Failed to load questions for room '{}': {}", room.id, e);
                room.abort_start();
                self.broadcast(
                    &room,
                    RoomEvent::CoachMessage {
                        text: QUIZ_LOAD_FAILED_MESSAGE.to_string(),
                    },
                )
                .await;
                return StartOutcome::Failed(e);
            }
        };

        let total = init.questions.len();
        let coach = init.coach.clone();
        let session_id = room.start_session(QuizSession::new(init.questions, init.coach));
        tracing::info!(
            "Quiz {} started in room '{}' with {} questions",
            session_id,
            room.id,
            total
        );

        self.broadcast(&room, RoomEvent::StartQuiz).await;
        if let Some(text) = coach {
            self.broadcast(&room, RoomEvent::CoachMessage { text }).await;
        }
        drop(room);

        self.deliver_question(shared, session_id, 0).await;
        StartOutcome::Started
    }

    /// `index` 番目の問題を取得して出題する。問題が尽きていれば終了する。
    async fn deliver_question(
        self: &Arc<Self>,
        shared: SharedRoom,
        session_id: SessionId,
        index: usize,
    ) {
        let questions = {
            let mut room = shared.lock().await;
            let Some(session) = room.active_session_mut(session_id) else {
                return;
            };
            if session.current_index() != index {
                return;
            }
            if session.is_exhausted() {
                self.finish(&mut room).await;
                return;
            }
            session.begin_fetch();
            session.questions().to_vec()
        };

        let next = self.content_client.next(questions, index).await;

        let mut room = shared.lock().await;
        let Some(session) = room.active_session_mut(session_id) else {
            tracing::debug!(
                "Quiz {} ended while fetching question {}",
                session_id,
                index + 1
            );
            return;
        };
        if session.current_index() != index {
            return;
        }

        match next {
            Ok(NextQuestion::Question { question, coach }) => {
                session.open_round();
                session.arm_timer(self.schedule_advance(Arc::clone(&shared), session_id, index));
                tracing::info!("Room '{}': question {} delivered", room.id, index + 1);

                self.broadcast(
                    &room,
                    RoomEvent::Question {
                        question,
                        time_secs: self.config.answer_window_secs(),
                    },
                )
                .await;
                if let Some(text) = coach {
                    self.broadcast(&room, RoomEvent::CoachMessage { text }).await;
                }
            }
            Ok(NextQuestion::End) => {
                tracing::info!("Content service ended quiz {} early", session_id);
                self.finish(&mut room).await;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to fetch question {} for room '{}': {}",
                    index + 1,
                    room.id,
                    e
                );
                room.halt_session();
                self.broadcast(
                    &room,
                    RoomEvent::CoachMessage {
                        text: QUIZ_INTERRUPTED_MESSAGE.to_string(),
                    },
                )
                .await;
                broadcast_room_update(self.message_pusher.as_ref(), &room).await;
            }
        }
    }

    /// 回答受付時間の経過後に次の問題へ進めるタイマーを起動する
    fn schedule_advance(
        self: &Arc<Self>,
        shared: SharedRoom,
        session_id: SessionId,
        index: usize,
    ) -> QuestionTimer {
        let runner = Arc::clone(self);
        let window = self.config.answer_window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // 進行処理はタイマーの中断対象から外す
            tokio::spawn(async move {
                runner.advance(shared, session_id, index).await;
            });
        });
        QuestionTimer::new(handle.abort_handle())
    }

    async fn advance(self: &Arc<Self>, shared: SharedRoom, session_id: SessionId, index: usize) {
        {
            let mut room = shared.lock().await;
            let Some(session) = room.active_session_mut(session_id) else {
                return;
            };
            if session.current_index() != index || !session.is_accepting_answers() {
                return;
            }
            session.advance();
        }
        self.deliver_question(shared, session_id, index + 1).await;
    }

    async fn finish(&self, room: &mut Room) {
        let ranking = room.finish_session();
        tracing::info!("Quiz finished in room '{}'", room.id);
        self.broadcast(room, RoomEvent::QuizEnd { ranking }).await;
        broadcast_room_update(self.message_pusher.as_ref(), room).await;
    }

    async fn broadcast(&self, room: &Room, event: RoomEvent) {
        broadcast_to_room(self.message_pusher.as_ref(), room, event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;

    use crate::{
        domain::{MockQuizContentClient, Question, QuizInit, RoomPhase, RoomRepository},
        infrastructure::repository::InMemoryRoomRepository,
        usecase::test_support::{RecordingPusher, conn, seed_room},
    };

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - Starting → Running → Idle の遷移と、各遷移で配信されるイベント
    // - 回答受付時間のタイマーによる自動進行
    // - コンテンツサービスの失敗時の扱い（開始中止・打ち切り）
    // - Room 削除時にタイマーが止まること
    //
    // 【どのようなシナリオをテストするか】
    // tokio の一時停止クロックで 15 秒の受付時間を進めながら検証する
    // ========================================

    const WINDOW: Duration = Duration::from_secs(15);

    fn questions(n: usize) -> Vec<Question> {
        (0..n).map(|i| Question::new(json!({ "q": i }))).collect()
    }

    /// next は問題セットの index 番目をそのまま返す
    fn serve_from_list(content: &mut MockQuizContentClient) {
        content.expect_next().returning(|questions, index| {
            Ok(match questions.get(index) {
                Some(question) => NextQuestion::Question {
                    question: question.clone(),
                    coach: None,
                },
                None => NextQuestion::End,
            })
        });
    }

    fn runner(content: MockQuizContentClient, pusher: Arc<RecordingPusher>) -> Arc<QuizSessionRunner> {
        Arc::new(QuizSessionRunner::new(
            Arc::new(content),
            pusher,
            LiveQuizConfig::default(),
        ))
    }

    /// 全員準備完了で Starting になった Room を作る
    async fn starting_room(repository: &InMemoryRoomRepository, ids: &[&str]) -> SharedRoom {
        let room = seed_room(repository, ids).await;
        {
            let mut guard = room.lock().await;
            for id in ids {
                guard.mark_ready(&conn(id), None).unwrap();
            }
            assert!(guard.try_begin_start());
        }
        room
    }

    fn question_event(i: usize) -> RoomEvent {
        RoomEvent::Question {
            question: Question::new(json!({ "q": i })),
            time_secs: 15,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_delivers_first_question() {
        // テスト項目: 開始すると startQuiz・コーチメッセージ・最初の問題が配信される
        // given (前提条件):
        let repository = InMemoryRoomRepository::new();
        let room = starting_room(&repository, &["alice", "bob"]).await;
        let pusher = RecordingPusher::new();
        let mut content = MockQuizContentClient::new();
        content.expect_init().times(1).returning(|_| {
            Ok(QuizInit {
                questions: questions(2),
                coach: Some("You're doing great!".to_string()),
            })
        });
        serve_from_list(&mut content);
        let runner = runner(content, pusher.clone());

        // when (操作):
        let outcome = runner.start(room.clone()).await;

        // then (期待する結果):
        assert_eq!(outcome, StartOutcome::Started);
        assert_eq!(
            pusher.events_for(&conn("bob")),
            vec![
                RoomEvent::StartQuiz,
                RoomEvent::CoachMessage {
                    text: "You're doing great!".to_string()
                },
                question_event(0),
            ]
        );
        let guard = room.lock().await;
        assert_eq!(guard.phase(), RoomPhase::InQuiz);
        assert!(guard.session().unwrap().is_accepting_answers());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_question_set_does_not_start() {
        // テスト項目: 問題が 0 件ならセッションを作らず、startQuiz も配信しない
        // given (前提条件):
        let repository = InMemoryRoomRepository::new();
        let room = starting_room(&repository, &["alice", "bob"]).await;
        let pusher = RecordingPusher::new();
        let mut content = MockQuizContentClient::new();
        content.expect_init().times(1).returning(|_| {
            Ok(QuizInit {
                questions: vec![],
                coach: None,
            })
        });
        content.expect_next().never();
        let runner = runner(content, pusher.clone());

        // when (操作):
        let outcome = runner.start(room.clone()).await;

        // then (期待する結果):
        assert_eq!(outcome, StartOutcome::Failed(QuizContentError::EmptyQuestionSet));
        assert_eq!(pusher.count("startQuiz"), 0);
        assert_eq!(pusher.count("coachMessage"), 1);
        let mut guard = room.lock().await;
        assert!(guard.session().is_none());
        assert_eq!(guard.phase(), RoomPhase::Waiting);
        // 全員準備完了のままなので再び開始できる
        assert!(guard.try_begin_start());
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_error_does_not_start() {
        // テスト項目: init がエラーならセッションを作らない
        // given (前提条件):
        let repository = InMemoryRoomRepository::new();
        let room = starting_room(&repository, &["alice", "bob"]).await;
        let pusher = RecordingPusher::new();
        let mut content = MockQuizContentClient::new();
        content
            .expect_init()
            .returning(|_| Err(QuizContentError::Status(500)));
        let runner = runner(content, pusher.clone());

        // when (操作):
        let outcome = runner.start(room.clone()).await;

        // then (期待する結果):
        assert_eq!(outcome, StartOutcome::Failed(QuizContentError::Status(500)));
        assert_eq!(pusher.count("startQuiz"), 0);
        assert!(room.lock().await.session().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_paces_questions_until_quiz_end() {
        // テスト項目: 受付時間ごとに次の問題へ進み、問題が尽きると quizEnd で終了する
        // given (前提条件):
        let repository = InMemoryRoomRepository::new();
        let room = starting_room(&repository, &["alice", "bob"]).await;
        let pusher = RecordingPusher::new();
        let mut content = MockQuizContentClient::new();
        content.expect_init().returning(|_| {
            Ok(QuizInit {
                questions: questions(2),
                coach: None,
            })
        });
        serve_from_list(&mut content);
        let runner = runner(content, pusher.clone());
        runner.start(room.clone()).await;

        // when (操作): 1 問目の受付時間が経過
        tokio::time::sleep(WINDOW + Duration::from_secs(1)).await;

        // then (期待する結果): 2 問目が出題される
        assert_eq!(pusher.count("question"), 2);
        assert_eq!(pusher.count("quizEnd"), 0);
        assert_eq!(room.lock().await.session().unwrap().current_index(), 1);

        // when (操作): 2 問目の受付時間が経過
        tokio::time::sleep(WINDOW).await;

        // then (期待する結果): quizEnd が配信され、セッションは破棄される
        assert_eq!(pusher.count("question"), 2);
        assert_eq!(pusher.count("quizEnd"), 1);
        let guard = room.lock().await;
        assert!(guard.session().is_none());
        assert!(guard.participants().iter().all(|p| !p.ready));
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_signal_finishes_early() {
        // テスト項目: next が終了を返したら残りの問題があっても終了する
        // given (前提条件):
        let repository = InMemoryRoomRepository::new();
        let room = starting_room(&repository, &["alice", "bob"]).await;
        let pusher = RecordingPusher::new();
        let mut content = MockQuizContentClient::new();
        content.expect_init().returning(|_| {
            Ok(QuizInit {
                questions: questions(5),
                coach: None,
            })
        });
        content.expect_next().times(2).returning(|questions, index| {
            Ok(if index == 0 {
                NextQuestion::Question {
                    question: questions[0].clone(),
                    coach: Some("Think fast".to_string()),
                }
            } else {
                NextQuestion::End
            })
        });
        let runner = runner(content, pusher.clone());
        runner.start(room.clone()).await;

        // when (操作):
        tokio::time::sleep(WINDOW + Duration::from_secs(1)).await;

        // then (期待する結果):
        assert_eq!(pusher.count("question"), 1);
        assert_eq!(pusher.count("quizEnd"), 1);
        assert!(room.lock().await.session().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_failure_halts_session() {
        // テスト項目: next の失敗で打ち切り、エラーメッセージを配信して自動進行を止める
        // given (前提条件):
        let repository = InMemoryRoomRepository::new();
        let room = starting_room(&repository, &["alice", "bob"]).await;
        let pusher = RecordingPusher::new();
        let mut content = MockQuizContentClient::new();
        content.expect_init().returning(|_| {
            Ok(QuizInit {
                questions: questions(3),
                coach: None,
            })
        });
        content.expect_next().times(2).returning(|questions, index| {
            if index == 0 {
                Ok(NextQuestion::Question {
                    question: questions[0].clone(),
                    coach: None,
                })
            } else {
                Err(QuizContentError::Request("connection reset".to_string()))
            }
        });
        let runner = runner(content, pusher.clone());
        runner.start(room.clone()).await;

        // when (操作):
        tokio::time::sleep(WINDOW * 4).await;

        // then (期待する結果):
        assert_eq!(pusher.count("question"), 1);
        assert_eq!(pusher.count("quizEnd"), 0);
        assert!(pusher.events().contains(&RoomEvent::CoachMessage {
            text: QUIZ_INTERRUPTED_MESSAGE.to_string()
        }));
        assert_eq!(room.lock().await.phase(), RoomPhase::Waiting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retired_room_stops_timer() {
        // テスト項目: 出題中に Room が廃止されるとタイマーは発火せず、次の問題も取得しない
        // given (前提条件):
        let repository = InMemoryRoomRepository::new();
        let room = starting_room(&repository, &["alice", "bob"]).await;
        let pusher = RecordingPusher::new();
        let mut content = MockQuizContentClient::new();
        content.expect_init().returning(|_| {
            Ok(QuizInit {
                questions: questions(3),
                coach: None,
            })
        });
        content.expect_next().times(1).returning(|questions, index| {
            Ok(NextQuestion::Question {
                question: questions[index].clone(),
                coach: None,
            })
        });
        let runner = runner(content, pusher.clone());
        runner.start(room.clone()).await;

        // when (操作):
        {
            let mut guard = room.lock().await;
            guard.remove_participant(&conn("alice"));
            guard.remove_participant(&conn("bob"));
            guard.retire();
            repository.delete_room(&guard.id).await;
        }
        tokio::time::sleep(WINDOW * 3).await;

        // then (期待する結果):
        assert_eq!(pusher.count("question"), 1);
        assert_eq!(pusher.count("quizEnd"), 0);
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_on_idle_room_is_abandoned() {
        // テスト項目: Starting でない Room では開始しない
        // given (前提条件):
        let repository = InMemoryRoomRepository::new();
        let room = seed_room(&repository, &["alice", "bob"]).await;
        let pusher = RecordingPusher::new();
        let mut content = MockQuizContentClient::new();
        content.expect_init().never();
        let runner = runner(content, pusher.clone());

        // when (操作):
        let outcome = runner.start(room).await;

        // then (期待する結果):
        assert_eq!(outcome, StartOutcome::Abandoned);
        assert!(pusher.events().is_empty());
    }
}
