//! QuizContentClient trait 定義
//!
//! 問題セットの生成と 1 問ずつの出題を行う外部サービスへのインターフェース。

use async_trait::async_trait;

use super::{CourseId, Question, QuizContentError};

/// `init` の結果
#[derive(Debug, Clone, PartialEq)]
pub struct QuizInit {
    pub questions: Vec<Question>,
    pub coach: Option<String>,
}

/// `next` の結果
#[derive(Debug, Clone, PartialEq)]
pub enum NextQuestion {
    /// 出題する問題（コーチメッセージ付きの場合あり）
    Question {
        question: Question,
        coach: Option<String>,
    },
    /// 残りの問題数に関係なくクイズを終了する
    End,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizContentClient: Send + Sync {
    /// コースの問題セットを取得する
    async fn init(&self, course_id: Option<CourseId>) -> Result<QuizInit, QuizContentError>;

    /// `index` 番目の問題を取得する
    async fn next(
        &self,
        questions: Vec<Question>,
        index: usize,
    ) -> Result<NextQuestion, QuizContentError>;
}
