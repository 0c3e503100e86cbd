//! Client configuration: backend endpoint, request timeout, display knobs.
//!
//! Environment variables first, optional TOML overlay. See `ClientConfig`
//! for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OPTION_WORD_LIMIT: usize = 5;

/// Configuration accepted in TOML. Every field is optional; defaults match
/// the backend's local development setup.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
  /// Base URL of the quiz backend; all three endpoints hang off it.
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Client-level timeout for every outbound request. A hung backend call
  /// fails after this instead of leaving the workflow loading forever.
  #[serde(default = "default_timeout_secs")]
  pub request_timeout_secs: u64,
  /// Word limit before quiz options are ellipsized in the question view.
  #[serde(default = "default_option_word_limit")]
  pub option_word_limit: usize,
}

fn default_base_url() -> String {
  DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
  DEFAULT_TIMEOUT_SECS
}
fn default_option_word_limit() -> usize {
  DEFAULT_OPTION_WORD_LIMIT
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      request_timeout_secs: default_timeout_secs(),
      option_word_limit: default_option_word_limit(),
    }
  }
}

/// Load configuration: TOML file from QUIZ_CONFIG_PATH if set and readable,
/// then QUIZ_API_BASE_URL on top. On any parsing/IO error the file is
/// logged and ignored.
pub fn load_client_config_from_env() -> ClientConfig {
  let mut cfg = match std::env::var("QUIZ_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match toml::from_str::<ClientConfig>(&s) {
        Ok(cfg) => {
          info!(target: "wikiquiz", %path, "Loaded client config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "wikiquiz", %path, error = %e, "Failed to parse TOML config");
          ClientConfig::default()
        }
      },
      Err(e) => {
        error!(target: "wikiquiz", %path, error = %e, "Failed to read TOML config file");
        ClientConfig::default()
      }
    },
    Err(_) => ClientConfig::default(),
  };

  if let Ok(base) = std::env::var("QUIZ_API_BASE_URL") {
    let base = base.trim();
    if !base.is_empty() {
      cfg.base_url = base.to_string();
    }
  }
  cfg.base_url = cfg.base_url.trim_end_matches('/').to_string();
  cfg
}
