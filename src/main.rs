//! Wiki Quiz · Terminal Client
//!
//! - Generates multiple-choice quizzes from Wikipedia articles via the quiz
//!   backend, in view or take mode, with scoring
//! - Browses previously generated quizzes with a detail view
//!
//! Important env variables:
//!   QUIZ_API_BASE_URL : backend base URL (default "http://127.0.0.1:8000")
//!   QUIZ_CONFIG_PATH  : path to TOML config (endpoint + display knobs)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod fault;
mod config;
mod api;
mod workflow;
mod history;
mod display;
mod shell;
#[cfg(test)]
mod testsupport;

use tracing::info;

use crate::api::BackendClient;
use crate::config::load_client_config_from_env;
use crate::history::HistoryBrowser;
use crate::shell::Shell;
use crate::workflow::QuizWorkflow;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = load_client_config_from_env();
  info!(target: "wikiquiz", base_url = %cfg.base_url, timeout_secs = cfg.request_timeout_secs, "Client configured");

  // One HTTP client shared by both controllers; they own disjoint state.
  let api = BackendClient::new(&cfg)?;
  let workflow = QuizWorkflow::new(api.clone());
  let history = HistoryBrowser::new(api);

  Shell::new(workflow, history, &cfg).run().await?;
  Ok(())
}
