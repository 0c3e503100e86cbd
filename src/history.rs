//! History browser: the list of past generations and the detail view.
//!
//! Faults here are logged, never surfaced as user-visible errors: the list
//! keeps its last known value and the detail view simply does not open.
//! This is asymmetric with the quiz workflow on purpose; see DESIGN.md.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::api::BackendClient;
use crate::domain::{HistoryDetail, HistorySummary, QuizData, QuizPayload};
use crate::fault::Fault;

/// State owned by the history browser.
#[derive(Clone, Debug, Default)]
pub struct HistoryState {
    pub items: Vec<HistorySummary>,
    pub loading: bool,
    pub selected: Option<HistoryDetail>,
}

#[derive(Clone)]
pub struct HistoryBrowser {
    state: Arc<RwLock<HistoryState>>,
    api: BackendClient,
}

impl HistoryBrowser {
    pub fn new(api: BackendClient) -> Self {
        Self {
            state: Arc::new(RwLock::new(HistoryState::default())),
            api,
        }
    }

    /// Read-only snapshot of the current state.
    pub async fn snapshot(&self) -> HistoryState {
        self.state.read().await.clone()
    }

    /// Fetch the summary list, replacing items on success. On failure the
    /// previous items stay in place.
    #[instrument(level = "info", skip(self))]
    pub async fn load_list(&self) {
        {
            self.state.write().await.loading = true;
        }
        match self.api.list_history().await {
            Ok(items) => {
                info!(target: "history", count = items.len(), "History list loaded");
                let mut st = self.state.write().await;
                st.items = items;
                st.loading = false;
            }
            Err(e) => {
                error!(target: "history", error = %e, "History list fetch failed; keeping previous items");
                self.state.write().await.loading = false;
            }
        }
    }

    /// Fetch one detail record and open it. On failure nothing opens.
    #[instrument(level = "info", skip(self), fields(%id))]
    pub async fn open_detail(&self, id: i64) {
        match self.api.quiz_detail(id).await {
            Ok(detail) => {
                info!(target: "history", %id, title = %detail.title, "History detail opened");
                self.state.write().await.selected = Some(detail);
            }
            Err(e) => {
                error!(target: "history", %id, error = %e, "History detail fetch failed");
            }
        }
    }

    /// Dismiss the detail view.
    pub async fn close_detail(&self) {
        self.state.write().await.selected = None;
    }
}

/// Normalize the persisted quiz payload, whether it arrived structured or
/// as a JSON-encoded string. A decode failure is a fault for the caller to
/// surface inside the detail view, never a panic.
pub fn render_quiz_data(data: &QuizData) -> Result<QuizPayload, Fault> {
    match data {
        QuizData::Structured(payload) => Ok(payload.clone()),
        QuizData::Encoded(raw) => {
            serde_json::from_str::<QuizPayload>(raw).map_err(|e| Fault::Decode(e.to_string()))
        }
    }
}
