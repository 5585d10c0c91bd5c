//! HTTP を使った QuizContentClient 実装
//!
//! - `POST {base}/quiz/init` body `{"courseId": ...}` -> `{"questions": [...], "coach": "..."}`
//! - `POST {base}/quiz/next` body `{"questions": [...], "index": n}` -> `{"question": ..., "coach": "...", "end": bool}`

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    config::ContentServiceConfig,
    domain::{CourseId, NextQuestion, Question, QuizContentClient, QuizContentError, QuizInit},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitRequest<'a> {
    course_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct InitResponse {
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    coach: Option<String>,
}

#[derive(Serialize)]
struct NextRequest<'a> {
    questions: &'a [Question],
    index: usize,
}

#[derive(Deserialize)]
struct NextResponse {
    #[serde(default)]
    question: Option<Question>,
    #[serde(default)]
    coach: Option<String>,
    #[serde(default)]
    end: bool,
}

/// HTTP を使った QuizContentClient 実装
pub struct HttpQuizContentClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpQuizContentClient {
    /// 設定からクライアントを作成
    pub fn new(config: &ContentServiceConfig) -> Result<Self, QuizContentError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| QuizContentError::Request(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, QuizContentError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| QuizContentError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuizContentError::Status(status.as_u16()));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| QuizContentError::Decode(e.to_string()))
    }
}

#[async_trait]
impl QuizContentClient for HttpQuizContentClient {
    async fn init(&self, course_id: Option<CourseId>) -> Result<QuizInit, QuizContentError> {
        let request = InitRequest {
            course_id: course_id.as_ref().map(|c| c.as_str()),
        };
        let response: InitResponse = self.post("/quiz/init", &request).await?;

        if response.questions.is_empty() {
            return Err(QuizContentError::EmptyQuestionSet);
        }
        Ok(QuizInit {
            questions: response.questions,
            coach: response.coach.filter(|c| !c.is_empty()),
        })
    }

    async fn next(
        &self,
        questions: Vec<Question>,
        index: usize,
    ) -> Result<NextQuestion, QuizContentError> {
        let request = NextRequest {
            questions: &questions,
            index,
        };
        let response: NextResponse = self.post("/quiz/next", &request).await?;

        match response.question {
            Some(question) if !response.end => Ok(NextQuestion::Question {
                question,
                coach: response.coach.filter(|c| !c.is_empty()),
            }),
            _ => Ok(NextQuestion::End),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - init / next のリクエスト形式とレスポンスの解釈
    // - 空の問題セット・終了シグナル・エラーステータスの扱い
    //
    // 【どのようなシナリオをテストするか】
    // ローカルに立てた axum サーバーをコンテンツサービスに見立てて呼び出す
    // ========================================

    async fn spawn_service(router: Router) -> HttpQuizContentClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        HttpQuizContentClient::new(&ContentServiceConfig {
            base_url: format!("http://{addr}/"),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_init_returns_questions_and_coach() {
        // テスト項目: init がコース ID を送り、問題セットとコーチメッセージを返す
        // given (前提条件):
        let router = Router::new().route(
            "/quiz/init",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"courseId": "C1"}));
                Json(json!({"questions": [{"q": 1}, {"q": 2}], "coach": "Bonne chance"}))
            }),
        );
        let client = spawn_service(router).await;

        // when (操作):
        let init = client
            .init(CourseId::from_optional(Some("C1".to_string())))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(init.questions.len(), 2);
        assert_eq!(init.coach.as_deref(), Some("Bonne chance"));
    }

    #[tokio::test]
    async fn test_init_sends_null_course() {
        // テスト項目: コース未指定の場合は courseId: null を送る
        // given (前提条件):
        let router = Router::new().route(
            "/quiz/init",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"courseId": null}));
                Json(json!({"questions": [{"q": 1}]}))
            }),
        );
        let client = spawn_service(router).await;

        // when (操作):
        let init = client.init(None).await.unwrap();

        // then (期待する結果):
        assert_eq!(init.questions.len(), 1);
        assert_eq!(init.coach, None);
    }

    #[tokio::test]
    async fn test_init_empty_question_set_is_error() {
        // テスト項目: 問題が 0 件の場合はエラー
        // given (前提条件):
        let router = Router::new().route(
            "/quiz/init",
            post(|| async { Json(json!({"questions": []})) }),
        );
        let client = spawn_service(router).await;

        // when (操作):
        let result = client.init(None).await;

        // then (期待する結果):
        assert_eq!(result, Err(QuizContentError::EmptyQuestionSet));
    }

    #[tokio::test]
    async fn test_init_error_status() {
        // テスト項目: 成功以外のステータスはエラー
        // given (前提条件):
        let router = Router::new().route(
            "/quiz/init",
            post(|| async { StatusCode::BAD_GATEWAY }),
        );
        let client = spawn_service(router).await;

        // when (操作):
        let result = client.init(None).await;

        // then (期待する結果):
        assert_eq!(result, Err(QuizContentError::Status(502)));
    }

    #[tokio::test]
    async fn test_next_returns_question() {
        // テスト項目: next が問題セットとインデックスを送り、問題を返す
        // given (前提条件):
        let router = Router::new().route(
            "/quiz/next",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["index"], json!(1));
                let question = body["questions"][1].clone();
                Json(json!({"question": question, "coach": "Focus!"}))
            }),
        );
        let client = spawn_service(router).await;
        let questions = vec![
            Question::new(json!({"q": 0})),
            Question::new(json!({"q": 1})),
        ];

        // when (操作):
        let next = client.next(questions, 1).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            next,
            NextQuestion::Question {
                question: Question::new(json!({"q": 1})),
                coach: Some("Focus!".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_next_end_signal() {
        // テスト項目: end: true や question の欠落は終了シグナルになる
        // given (前提条件):
        let router = Router::new()
            .route(
                "/quiz/next",
                post(|Json(body): Json<Value>| async move {
                    if body["index"] == json!(0) {
                        Json(json!({"question": {"q": 0}, "end": true}))
                    } else {
                        Json(json!({"coach": "done"}))
                    }
                }),
            );
        let client = spawn_service(router).await;
        let questions = vec![Question::new(json!({"q": 0}))];

        // when (操作):
        let explicit = client.next(questions.clone(), 0).await.unwrap();
        let missing = client.next(questions, 1).await.unwrap();

        // then (期待する結果):
        assert_eq!(explicit, NextQuestion::End);
        assert_eq!(missing, NextQuestion::End);
    }

    #[tokio::test]
    async fn test_next_malformed_body() {
        // テスト項目: JSON でないレスポンスはデコードエラー
        // given (前提条件):
        let router = Router::new().route("/quiz/next", post(|| async { "not json" }));
        let client = spawn_service(router).await;

        // when (操作):
        let result = client.next(vec![], 0).await;

        // then (期待する結果):
        assert!(matches!(result, Err(QuizContentError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // テスト項目: 接続できないサービスはリクエストエラー
        // given (前提条件):
        let client = HttpQuizContentClient::new(&ContentServiceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap();

        // when (操作):
        let result = client.init(None).await;

        // then (期待する結果):
        assert!(matches!(result, Err(QuizContentError::Request(_))));
    }
}
