//! Runtime configuration for the live quiz.

use std::time::Duration;

/// Default answer window per question, in seconds.
pub const DEFAULT_ANSWER_WINDOW_SECS: u64 = 15;
/// Default points awarded for a correct answer.
pub const DEFAULT_SCORE_PER_CORRECT_ANSWER: u32 = 10;
/// Default base URL of the quiz content service.
pub const DEFAULT_CONTENT_SERVICE_URL: &str = "http://127.0.0.1:8000";
/// Default request timeout for the quiz content service, in seconds.
pub const DEFAULT_CONTENT_TIMEOUT_SECS: u64 = 30;
/// Default browser origin allowed to call the HTTP API (the web front end's dev server).
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Pacing and scoring of a quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveQuizConfig {
    /// How long each question stays open for answers.
    pub answer_window: Duration,
    /// Points awarded per correct answer.
    pub score_per_correct_answer: u32,
}

impl LiveQuizConfig {
    /// The answer window as sent to clients in the `question` event.
    pub fn answer_window_secs(&self) -> u64 {
        self.answer_window.as_secs()
    }
}

impl Default for LiveQuizConfig {
    fn default() -> Self {
        Self {
            answer_window: Duration::from_secs(DEFAULT_ANSWER_WINDOW_SECS),
            score_per_correct_answer: DEFAULT_SCORE_PER_CORRECT_ANSWER,
        }
    }
}

/// Where and how to reach the quiz content service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentServiceConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ContentServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CONTENT_SERVICE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_CONTENT_TIMEOUT_SECS),
        }
    }
}
