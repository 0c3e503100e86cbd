//! HTTP client for the quiz backend services.
//!
//! Thin by construction: one reqwest client with a request-level timeout and
//! one method per endpoint. Calls are instrumented and log status codes and
//! payload sizes, not contents.
//!
//! Failure contract (see also `fault.rs`):
//! - generation surfaces the response body text verbatim when present,
//!   else a generic fallback;
//! - history list/detail failures become retrieval faults for the caller
//!   to log, never user-facing errors.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::config::ClientConfig;
use crate::domain::{GeneratedQuiz, HistoryDetail, HistorySummary, QuizRequest};
use crate::fault::Fault;
use crate::util::trunc_for_log;

/// Fallback message when a non-success response carries no body.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

#[derive(Clone)]
pub struct BackendClient {
  client: reqwest::Client,
  base_url: String,
}

impl BackendClient {
  /// Build the client from config. The timeout bounds every outbound call.
  pub fn new(cfg: &ClientConfig) -> Result<Self, Fault> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.request_timeout_secs))
      .build()
      .map_err(|e| Fault::Request(format!("HTTP client init failed: {}", e)))?;

    Ok(Self {
      client,
      base_url: cfg.base_url.trim_end_matches('/').to_string(),
    })
  }

  /// Ask the backend to build a quiz from a Wikipedia article URL.
  #[instrument(level = "info", skip(self, url), fields(url_len = url.len()))]
  pub async fn generate_quiz(&self, url: &str) -> Result<GeneratedQuiz, Fault> {
    let endpoint = format!("{}/generate_quiz/", self.base_url);
    let res = self.client.post(&endpoint)
      .header(USER_AGENT, "wikiquiz-client/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&QuizRequest { url: url.to_string() })
      .send().await
      .map_err(|e| Fault::Request(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      warn!(target: "quiz", %status, body = %trunc_for_log(&body, 200), "Generation request rejected");
      let msg = if body.trim().is_empty() {
        GENERIC_SERVER_ERROR.to_string()
      } else {
        extract_backend_detail(&body).unwrap_or(body)
      };
      return Err(Fault::Request(msg));
    }

    let quiz: GeneratedQuiz = res.json().await
      .map_err(|e| Fault::Request(format!("Malformed quiz response: {}", e)))?;
    info!(target: "quiz", title = %quiz.title, questions = quiz.quiz.len(), "Quiz received");
    Ok(quiz)
  }

  /// Summaries of past generations, server order preserved.
  #[instrument(level = "info", skip(self))]
  pub async fn list_history(&self) -> Result<Vec<HistorySummary>, Fault> {
    let endpoint = format!("{}/history", self.base_url);
    let res = self.client.get(&endpoint)
      .header(USER_AGENT, "wikiquiz-client/0.1")
      .send().await
      .map_err(|e| Fault::Retrieval(e.to_string()))?;

    if !res.status().is_success() {
      return Err(Fault::Retrieval(format!("history list HTTP {}", res.status())));
    }
    res.json().await
      .map_err(|e| Fault::Retrieval(format!("malformed history list: {}", e)))
  }

  /// Full persisted record for one past quiz.
  #[instrument(level = "info", skip(self), fields(%id))]
  pub async fn quiz_detail(&self, id: i64) -> Result<HistoryDetail, Fault> {
    let endpoint = format!("{}/quiz/{}", self.base_url, id);
    let res = self.client.get(&endpoint)
      .header(USER_AGENT, "wikiquiz-client/0.1")
      .send().await
      .map_err(|e| Fault::Retrieval(e.to_string()))?;

    if !res.status().is_success() {
      return Err(Fault::Retrieval(format!("quiz detail HTTP {}", res.status())));
    }
    res.json().await
      .map_err(|e| Fault::Retrieval(format!("malformed quiz detail: {}", e)))
  }
}

/// Try to pull the `detail` message out of a backend error body. The
/// backend wraps its rejections as `{"detail": "..."}`; anything else is
/// surfaced as-is.
fn extract_backend_detail(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct DWrap {
    detail: String,
  }
  serde_json::from_str::<DWrap>(body).ok().map(|w| w.detail)
}
