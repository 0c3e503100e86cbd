//! Render-time derivations for the quiz views. Pure functions, no state;
//! the shell calls these, and so do the tests.

use crate::domain::Question;

/// How many related topics the quiz header shows at most.
pub const RELATED_TOPICS_SHOWN: usize = 6;

/// Per-option display flags derived from the current selection and the
/// question's answer. `correct` and `wrong` never coexist; `selected`
/// combines with either.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptionFlags {
  pub selected: bool,
  pub correct: bool,
  pub wrong: bool,
}

/// Derive display flags for one option. `scored` is whether the attempt
/// has been submitted; before that only selection is marked.
pub fn option_flags(
  question: &Question,
  selection: Option<&str>,
  option: &str,
  scored: bool,
) -> OptionFlags {
  let selected = selection == Some(option);
  let mut flags = OptionFlags { selected, ..OptionFlags::default() };
  if scored {
    if option == question.answer {
      flags.correct = true;
    } else if selected {
      flags.wrong = true;
    }
  }
  flags
}

/// Word-limit ellipsis for long options; text at or under the limit passes
/// through unchanged.
pub fn truncate_option(text: &str, word_limit: usize) -> String {
  let words: Vec<&str> = text.split_whitespace().collect();
  if words.len() > word_limit {
    format!("{}...", words[..word_limit].join(" "))
  } else {
    text.to_string()
  }
}

/// Topics capped for the header display.
pub fn related_topics_shown(topics: &[String]) -> &[String] {
  &topics[..topics.len().min(RELATED_TOPICS_SHOWN)]
}
