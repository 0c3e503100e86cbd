//! Domain models shared by the quiz workflow and the history browser:
//! generated quizzes, questions, and persisted history records.

use serde::{Deserialize, Serialize};

/// Body of a generation request. Built once per submission, never mutated,
/// discarded after the request resolves.
#[derive(Debug, Serialize)]
pub struct QuizRequest {
  pub url: String,
}

/// A generated multiple-choice quiz as returned by the backend.
///
/// The backend also emits `id` and `url` alongside the quiz content; we keep
/// them when present but nothing in the client depends on them.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GeneratedQuiz {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
  pub title: String,
  #[serde(default)]
  pub summary: String,
  #[serde(default)]
  pub related_topics: Vec<String>,
  #[serde(default)]
  pub quiz: Vec<Question>,
}

/// One multiple-choice question. `answer` is an exact member of `options`;
/// the backend owns that invariant, scoring relies on it.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Question {
  pub question: String,
  pub options: Vec<String>,
  pub answer: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub difficulty: Option<String>,
}

/// Lightweight record identifying one past generation, in server order.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HistorySummary {
  pub id: i64,
  pub title: String,
  pub url: String,
  #[serde(default)]
  pub date_generated: Option<String>,
}

/// Full persisted record for one past quiz.
#[derive(Clone, Debug, Deserialize)]
pub struct HistoryDetail {
  pub id: i64,
  pub title: String,
  pub url: String,
  #[serde(default)]
  pub summary: String,
  pub full_quiz_data: QuizData,
}

/// The persisted quiz payload arrives either already structured or as a
/// JSON-encoded string, depending on how the backend stored it. Consumers
/// normalize through `history::render_quiz_data` before display.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum QuizData {
  Structured(QuizPayload),
  Encoded(String),
}

/// Structured form of the persisted payload. Both fields may be absent in
/// older records.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct QuizPayload {
  #[serde(default)]
  pub quiz: Vec<Question>,
  #[serde(default)]
  pub related_topics: Vec<String>,
}
