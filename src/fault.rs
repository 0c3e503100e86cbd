//! Fault taxonomy. Every failure in the client is scoped to a single user
//! action and leaves prior valid state intact; nothing here is fatal to the
//! process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Fault {
  /// Local input rejection (empty URL, wrong domain). Never reaches the
  /// network; the message is surfaced immediately.
  #[error("{0}")]
  Validation(String),

  /// Generation request failed: non-success status or transport fault.
  /// The message carries the response body text when the backend sent one.
  #[error("{0}")]
  Request(String),

  /// History list/detail failed. Logged only; the user keeps prior state.
  #[error("{0}")]
  Retrieval(String),

  /// Persisted quiz payload could not be decoded into a structured form.
  #[error("quiz data decode failed: {0}")]
  Decode(String),
}
