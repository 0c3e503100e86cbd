//! Test-only helpers: an in-process mock quiz backend and canned payloads.

use axum::Router;
use tokio::net::TcpListener;

use crate::api::BackendClient;
use crate::config::ClientConfig;

/// Bind the router on an ephemeral local port and serve it in the
/// background. Returns the base URL to point a client at.
pub async fn serve(router: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
  let addr = listener.local_addr().expect("mock backend addr");
  tokio::spawn(async move {
    axum::serve(listener, router).await.expect("serve mock backend");
  });
  format!("http://{}", addr)
}

/// Client pointed at a mock backend, with a short timeout so a broken test
/// fails fast instead of hanging.
pub fn client_for(base_url: &str) -> BackendClient {
  let cfg = ClientConfig {
    base_url: base_url.to_string(),
    request_timeout_secs: 5,
    option_word_limit: 5,
  };
  BackendClient::new(&cfg).expect("client")
}

/// Two-question quiz used across workflow tests. Answers: "Bletchley Park"
/// and "1954".
pub fn sample_quiz_json(title: &str) -> serde_json::Value {
  serde_json::json!({
    "id": 1,
    "url": "https://en.wikipedia.org/wiki/Alan_Turing",
    "title": title,
    "summary": "British mathematician and computer scientist.",
    "related_topics": ["Cryptography", "Enigma", "Computability"],
    "quiz": [
      {
        "question": "Where did Turing work during the war?",
        "options": ["Bletchley Park", "Cambridge", "Manchester", "London"],
        "answer": "Bletchley Park"
      },
      {
        "question": "In which year did Turing die?",
        "options": ["1950", "1954", "1960", "1948"],
        "answer": "1954",
        "difficulty": "easy"
      }
    ]
  })
}
