//! Quiz workflow controller: owns the lifecycle of one generated quiz.
//!
//! This module owns:
//!   - URL validation (syntactic wikipedia.org check, nothing more)
//!   - the generation request lifecycle, fenced by a sequence number
//!   - View/Take mode and per-question answer selection
//!   - scoring on explicit submission
//!
//! Rapid resubmission: every generation request captures a monotonically
//! increasing sequence number, and a response is applied only while it is
//! still the latest issued request. Stale responses are discarded with a
//! warning and mutate nothing, so the last *issued* request wins.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::api::BackendClient;
use crate::domain::GeneratedQuiz;

pub const EMPTY_URL_MESSAGE: &str = "Please enter a Wikipedia URL";
pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid Wikipedia URL (e.g., https://en.wikipedia.org/wiki/Alan_Turing)";

/// Display state for a generated quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Every question shown with answer and explanation revealed.
    View,
    /// One selection per question, answers hidden until submission.
    Take,
}

/// State owned by the workflow controller for the lifetime of one quiz.
#[derive(Clone, Debug)]
pub struct WorkflowState {
    pub url: String,
    pub loading: bool,
    pub result: Option<GeneratedQuiz>,
    pub error: Option<String>,
    pub mode: Mode,
    /// Question index -> exact option string selected. Keys exist only for
    /// answered questions.
    pub answers: HashMap<usize, String>,
    /// `"<correct> / <total>"`, present only after explicit submission.
    pub score: Option<String>,
    latest_seq: u64,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            url: String::new(),
            loading: false,
            result: None,
            error: None,
            mode: Mode::View,
            answers: HashMap::new(),
            score: None,
            latest_seq: 0,
        }
    }
}

/// Syntactic check only: an absolute URL whose hostname contains the
/// substring `wikipedia.org`. Does not verify the page exists.
pub fn validate(url: &str) -> bool {
    match reqwest::Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .map(|h| h.contains("wikipedia.org"))
            .unwrap_or(false),
        Err(_) => false,
    }
}

#[derive(Clone)]
pub struct QuizWorkflow {
    state: Arc<RwLock<WorkflowState>>,
    api: BackendClient,
}

impl QuizWorkflow {
    pub fn new(api: BackendClient) -> Self {
        Self {
            state: Arc::new(RwLock::new(WorkflowState::default())),
            api,
        }
    }

    /// Read-only snapshot of the current state.
    pub async fn snapshot(&self) -> WorkflowState {
        self.state.read().await.clone()
    }

    /// Validate and submit a generation request.
    ///
    /// Validation failures set a specific message and never reach the
    /// network. Otherwise the previous result and score are cleared up
    /// front, and the response is applied only if no newer request has
    /// been issued in the meantime.
    #[instrument(level = "info", skip(self, url), fields(url_len = url.len()))]
    pub async fn submit(&self, url: &str) {
        let seq = {
            let mut st = self.state.write().await;
            st.url = url.to_string();
            st.error = None;
            st.result = None;
            st.score = None;
            if url.is_empty() {
                info!(target: "quiz", "Submission rejected: empty URL");
                st.error = Some(EMPTY_URL_MESSAGE.to_string());
                return;
            }
            if !validate(url) {
                info!(target: "quiz", "Submission rejected: not a Wikipedia URL");
                st.error = Some(INVALID_URL_MESSAGE.to_string());
                return;
            }
            st.loading = true;
            st.latest_seq += 1;
            st.latest_seq
        };

        let outcome = self.api.generate_quiz(url).await;

        let mut st = self.state.write().await;
        if st.latest_seq != seq {
            warn!(target: "quiz", seq, latest = st.latest_seq, "Discarding stale generation response");
            return;
        }
        st.loading = false;
        match outcome {
            Ok(quiz) => {
                info!(target: "quiz", seq, title = %quiz.title, questions = quiz.quiz.len(), "Quiz generated");
                st.result = Some(quiz);
                st.mode = Mode::View;
                st.answers.clear();
                st.score = None;
            }
            Err(e) => {
                warn!(target: "quiz", seq, error = %e, "Quiz generation failed");
                st.error = Some(e.to_string());
            }
        }
    }

    /// Switch between View and Take. Always discards in-progress answers
    /// and any score; partial attempt state never crosses modes.
    #[instrument(level = "debug", skip(self))]
    pub async fn set_mode(&self, mode: Mode) {
        let mut st = self.state.write().await;
        st.mode = mode;
        st.answers.clear();
        st.score = None;
    }

    /// Record a selection for one question, overwriting any previous one.
    ///
    /// The state layer stays permissive here: the calling surface only
    /// offers selection in Take mode before scoring.
    pub async fn select_answer(&self, question: usize, option: &str) {
        let mut st = self.state.write().await;
        st.answers.insert(question, option.to_string());
    }

    /// Score the current attempt: recorded answers strictly equal to the
    /// question's answer, counted over the total question count. A no-op
    /// without a generated quiz.
    #[instrument(level = "info", skip(self))]
    pub async fn submit_quiz(&self) {
        let mut st = self.state.write().await;
        let score = {
            let Some(result) = st.result.as_ref() else { return };
            if result.quiz.is_empty() {
                return;
            }
            let total = result.quiz.len();
            let correct = result
                .quiz
                .iter()
                .enumerate()
                .filter(|(i, q)| st.answers.get(i).is_some_and(|a| *a == q.answer))
                .count();
            info!(target: "quiz", correct, total, "Quiz scored");
            format!("{} / {}", correct, total)
        };
        st.score = Some(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};

    use crate::testsupport::{client_for, sample_quiz_json, serve};

    fn offline_workflow() -> QuizWorkflow {
        // Closed port: any network attempt would surface a transport error
        // instead of the expected validation message.
        QuizWorkflow::new(client_for("http://127.0.0.1:9"))
    }

    #[test]
    fn validate_rejects_empty_and_non_urls() {
        assert!(!validate(""));
        assert!(!validate("alan turing"));
        assert!(!validate("wikipedia"));
        assert!(!validate("en.wikipedia.org/wiki/Alan_Turing"));
    }

    #[test]
    fn validate_rejects_other_hosts() {
        assert!(!validate("https://example.com/wiki/Alan_Turing"));
        assert!(!validate("https://en.wikipedia.com/wiki/Alan_Turing"));
    }

    #[test]
    fn validate_accepts_any_wikipedia_host() {
        assert!(validate("https://en.wikipedia.org/wiki/Alan_Turing"));
        assert!(validate("https://de.wikipedia.org/wiki/Alan_Turing"));
        assert!(validate("http://wikipedia.org"));
        assert!(validate("https://en.wikipedia.org/wiki/Rust_(programming_language)?foo=1"));
    }

    #[tokio::test]
    async fn empty_url_sets_specific_message_without_a_request() {
        let wf = offline_workflow();
        wf.submit("").await;
        let st = wf.snapshot().await;
        assert_eq!(st.error.as_deref(), Some(EMPTY_URL_MESSAGE));
        assert!(!st.loading);
        assert!(st.result.is_none());
    }

    #[tokio::test]
    async fn invalid_domain_sets_specific_message_without_a_request() {
        let wf = offline_workflow();
        wf.submit("https://example.com/wiki/Alan_Turing").await;
        let st = wf.snapshot().await;
        assert_eq!(st.error.as_deref(), Some(INVALID_URL_MESSAGE));
        assert!(!st.loading);
    }

    #[tokio::test]
    async fn generate_success_populates_result_and_resets_to_view() {
        let router = Router::new().route(
            "/generate_quiz/",
            post(|| async { Json(sample_quiz_json("Alan Turing")) }),
        );
        let base = serve(router).await;
        let wf = QuizWorkflow::new(client_for(&base));

        // Leftover attempt state from a previous quiz must not leak through.
        wf.set_mode(Mode::Take).await;
        wf.select_answer(0, "stale").await;

        wf.submit("https://en.wikipedia.org/wiki/Alan_Turing").await;

        let st = wf.snapshot().await;
        let result = st.result.expect("result");
        assert_eq!(result.title, "Alan Turing");
        assert_eq!(result.quiz.len(), 2);
        assert_eq!(st.mode, Mode::View);
        assert!(st.error.is_none());
        assert!(st.answers.is_empty());
        assert!(st.score.is_none());
        assert!(!st.loading);
    }

    #[tokio::test]
    async fn generate_failure_surfaces_body_text() {
        let router = Router::new().route(
            "/generate_quiz/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "server overloaded") }),
        );
        let base = serve(router).await;
        let wf = QuizWorkflow::new(client_for(&base));

        wf.submit("https://en.wikipedia.org/wiki/Alan_Turing").await;

        let st = wf.snapshot().await;
        assert_eq!(st.error.as_deref(), Some("server overloaded"));
        assert!(st.result.is_none());
        assert!(!st.loading);
    }

    #[tokio::test]
    async fn set_mode_is_idempotent_and_resets_attempt_state() {
        let wf = offline_workflow();
        wf.select_answer(0, "A").await;
        wf.set_mode(Mode::Take).await;

        let first = wf.snapshot().await;
        assert_eq!(first.mode, Mode::Take);
        assert!(first.answers.is_empty());
        assert!(first.score.is_none());

        wf.select_answer(1, "B").await;
        wf.set_mode(Mode::Take).await;

        let second = wf.snapshot().await;
        assert_eq!(second.mode, Mode::Take);
        assert!(second.answers.is_empty());
        assert!(second.score.is_none());
    }

    #[tokio::test]
    async fn scoring_counts_only_exact_matches() {
        let router = Router::new().route(
            "/generate_quiz/",
            post(|| async { Json(sample_quiz_json("Alan Turing")) }),
        );
        let base = serve(router).await;
        let wf = QuizWorkflow::new(client_for(&base));

        wf.submit("https://en.wikipedia.org/wiki/Alan_Turing").await;
        wf.set_mode(Mode::Take).await;
        wf.select_answer(0, "Bletchley Park").await;
        wf.select_answer(1, "1950").await;
        wf.submit_quiz().await;

        let st = wf.snapshot().await;
        assert_eq!(st.score.as_deref(), Some("1 / 2"));
    }

    #[tokio::test]
    async fn scoring_with_no_answers_counts_zero_over_total() {
        let router = Router::new().route(
            "/generate_quiz/",
            post(|| async {
                let mut quiz = sample_quiz_json("Alan Turing");
                quiz["quiz"].as_array_mut().expect("quiz array").push(serde_json::json!({
                    "question": "What machine did Turing formalize?",
                    "options": ["Turing machine", "Difference engine"],
                    "answer": "Turing machine"
                }));
                Json(quiz)
            }),
        );
        let base = serve(router).await;
        let wf = QuizWorkflow::new(client_for(&base));

        wf.submit("https://en.wikipedia.org/wiki/Alan_Turing").await;
        wf.set_mode(Mode::Take).await;
        wf.submit_quiz().await;

        let st = wf.snapshot().await;
        assert_eq!(st.score.as_deref(), Some("0 / 3"));
    }

    #[tokio::test]
    async fn submit_quiz_without_result_is_a_noop() {
        let wf = offline_workflow();
        wf.submit_quiz().await;
        assert!(wf.snapshot().await.score.is_none());
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let router = Router::new().route(
            "/generate_quiz/",
            post(|Json(body): Json<serde_json::Value>| async move {
                let url = body.get("url").and_then(|u| u.as_str()).unwrap_or_default();
                if url.contains("Slow_article") {
                    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                    Json(sample_quiz_json("Slow"))
                } else {
                    Json(sample_quiz_json("Fast"))
                }
            }),
        );
        let base = serve(router).await;
        let wf = QuizWorkflow::new(client_for(&base));

        // First submission stalls in the backend, second overtakes it; the
        // late response must not clobber the newer result.
        tokio::join!(
            wf.submit("https://en.wikipedia.org/wiki/Slow_article"),
            wf.submit("https://en.wikipedia.org/wiki/Fast_article"),
        );

        let st = wf.snapshot().await;
        assert_eq!(st.result.expect("result").title, "Fast");
        assert!(st.error.is_none());
        assert!(!st.loading);
    }
}
