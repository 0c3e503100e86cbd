//! Small utility helpers used across modules.

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_strings_pass_through() {
    assert_eq!(trunc_for_log("ok", 10), "ok");
  }

  #[test]
  fn long_strings_are_cut_with_length_note() {
    let out = trunc_for_log("abcdefghij", 4);
    assert!(out.starts_with("abcd…"));
    assert!(out.contains("10 bytes"));
  }
}
