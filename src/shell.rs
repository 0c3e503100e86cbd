//! Interactive terminal shell: the presentation layer over the two
//! controllers. One command per line, plain-text views, no business logic.
//!
//! The shell is where the caller discipline documented in `workflow.rs`
//! lives: selection is only offered in Take mode, and answers freeze once
//! the attempt has been scored.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::config::ClientConfig;
use crate::display::{option_flags, related_topics_shown, truncate_option};
use crate::domain::{HistoryDetail, HistorySummary};
use crate::history::{render_quiz_data, HistoryBrowser};
use crate::workflow::{Mode, QuizWorkflow, WorkflowState};

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
  Generate(String),
  View,
  Take,
  /// 1-based question and option numbers, as typed.
  Answer { question: usize, option: usize },
  Submit,
  History,
  Detail(i64),
  Close,
  Help,
  Quit,
}

/// Parse one input line. Returns None for unrecognized input.
pub fn parse_command(line: &str) -> Option<Command> {
  let mut parts = line.split_whitespace();
  match parts.next()? {
    "generate" => Some(Command::Generate(parts.next().unwrap_or_default().to_string())),
    "view" => Some(Command::View),
    "take" => Some(Command::Take),
    "answer" => {
      let question = parts.next()?.parse().ok()?;
      let option = parts.next()?.parse().ok()?;
      Some(Command::Answer { question, option })
    }
    "submit" => Some(Command::Submit),
    "history" => Some(Command::History),
    "detail" => Some(Command::Detail(parts.next()?.parse().ok()?)),
    "close" => Some(Command::Close),
    "help" => Some(Command::Help),
    "quit" | "exit" => Some(Command::Quit),
    _ => None,
  }
}

pub struct Shell {
  workflow: QuizWorkflow,
  history: HistoryBrowser,
  word_limit: usize,
}

impl Shell {
  pub fn new(workflow: QuizWorkflow, history: HistoryBrowser, cfg: &ClientConfig) -> Self {
    Self {
      workflow,
      history,
      word_limit: cfg.option_word_limit,
    }
  }

  /// Read-eval-print loop over stdin. Returns when the user quits or the
  /// input stream closes.
  pub async fn run(&self) -> std::io::Result<()> {
    println!("Wiki quiz client. Type `help` for commands.");
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
      let line = line.trim();
      if line.is_empty() {
        prompt()?;
        continue;
      }
      match parse_command(line) {
        Some(Command::Quit) => break,
        Some(cmd) => {
          debug!(target: "wikiquiz", ?cmd, "Dispatching command");
          self.dispatch(cmd).await;
        }
        None => println!("Unknown command. Type `help` for the list."),
      }
      prompt()?;
    }
    Ok(())
  }

  async fn dispatch(&self, cmd: Command) {
    match cmd {
      Command::Generate(url) => {
        println!("Generating...");
        self.workflow.submit(&url).await;
        let st = self.workflow.snapshot().await;
        match &st.error {
          Some(message) => println!("Error: {}", message),
          None => self.render_quiz(&st),
        }
      }
      Command::View => {
        if self.workflow.snapshot().await.result.is_none() {
          println!("No quiz yet. Try: generate <wikipedia url>");
          return;
        }
        self.workflow.set_mode(Mode::View).await;
        self.render_quiz(&self.workflow.snapshot().await);
      }
      Command::Take => {
        if self.workflow.snapshot().await.result.is_none() {
          println!("No quiz yet. Try: generate <wikipedia url>");
          return;
        }
        self.workflow.set_mode(Mode::Take).await;
        self.render_quiz(&self.workflow.snapshot().await);
      }
      Command::Answer { question, option } => {
        let st = self.workflow.snapshot().await;
        let Some(result) = st.result.as_ref() else {
          println!("No quiz yet. Try: generate <wikipedia url>");
          return;
        };
        if st.mode != Mode::Take {
          println!("Switch to take mode first (`take`).");
          return;
        }
        if st.score.is_some() {
          println!("Answers are frozen after scoring. Re-enter take mode to retry.");
          return;
        }
        let Some(q) = question.checked_sub(1).and_then(|i| result.quiz.get(i)) else {
          println!("No question {} in this quiz.", question);
          return;
        };
        let Some(selected) = option.checked_sub(1).and_then(|i| q.options.get(i)) else {
          println!("Question {} has no option {}.", question, option);
          return;
        };
        self.workflow.select_answer(question - 1, selected).await;
        println!("Question {}: selected {}", question, truncate_option(selected, self.word_limit));
      }
      Command::Submit => {
        let st = self.workflow.snapshot().await;
        if st.result.is_none() {
          println!("No quiz yet. Try: generate <wikipedia url>");
          return;
        }
        if st.mode != Mode::Take {
          println!("Enter take mode first (`take`), answer, then submit.");
          return;
        }
        self.workflow.submit_quiz().await;
        self.render_quiz(&self.workflow.snapshot().await);
      }
      Command::History => {
        println!("Loading quiz history...");
        self.history.load_list().await;
        render_history(&self.history.snapshot().await.items);
      }
      Command::Detail(id) => {
        self.history.open_detail(id).await;
        if let Some(detail) = self.history.snapshot().await.selected.as_ref() {
          render_detail(detail);
        }
      }
      Command::Close => {
        self.history.close_detail().await;
      }
      Command::Help => print_help(),
      Command::Quit => unreachable!("handled in run()"),
    }
  }

  fn render_quiz(&self, st: &WorkflowState) {
    let Some(result) = st.result.as_ref() else {
      println!("No quiz yet. Try: generate <wikipedia url>");
      return;
    };

    println!();
    println!("== {} ==", result.title);
    if !result.summary.is_empty() {
      println!("{}", result.summary);
    }
    let topics = related_topics_shown(&result.related_topics);
    if !topics.is_empty() {
      println!("Related topics: {}", topics.join(", "));
    }
    match st.mode {
      Mode::View => println!("[view mode: answers revealed; `take` to attempt]"),
      Mode::Take => println!("[take mode: `answer <q> <option>`, then `submit`]"),
    }
    if let Some(score) = &st.score {
      println!("Score: {}", score);
    }

    let scored = st.score.is_some();
    for (idx, q) in result.quiz.iter().enumerate() {
      println!();
      match &q.difficulty {
        Some(d) => println!("{}. {} [{}]", idx + 1, q.question, d),
        None => println!("{}. {}", idx + 1, q.question),
      }
      let selection = st.answers.get(&idx).map(String::as_str);
      for (i, option) in q.options.iter().enumerate() {
        let text = truncate_option(option, self.word_limit);
        match st.mode {
          Mode::View => println!("    {}) {}", i + 1, text),
          Mode::Take => {
            let flags = option_flags(q, selection, option, scored);
            let sel = if flags.selected { ">" } else { " " };
            let mark = if flags.correct {
              " ✓"
            } else if flags.wrong {
              " ✗"
            } else {
              ""
            };
            println!("  {} {}) {}{}", sel, i + 1, text, mark);
          }
        }
      }
      if st.mode == Mode::View {
        println!("    Answer: {}", q.answer);
        if let Some(expl) = &q.explanation {
          println!("    Explanation: {}", expl);
        }
      }
    }
    println!();
  }
}

fn render_history(items: &[HistorySummary]) {
  if items.is_empty() {
    println!("No quizzes generated yet.");
    println!("Use `generate <wikipedia url>` to create your first quiz.");
    return;
  }
  println!();
  println!("{:>4}  {:<32}  {:<20}  Source", "ID", "Title", "Created");
  for it in items {
    let created = it.date_generated.as_deref().unwrap_or("-");
    let source = it
      .url
      .strip_prefix("https://en.wikipedia.org/wiki/")
      .unwrap_or(&it.url);
    println!("{:>4}  {:<32}  {:<20}  {}", it.id, it.title, created, source);
  }
  println!();
  println!("Use `detail <id>` to inspect a quiz.");
}

fn render_detail(detail: &HistoryDetail) {
  println!();
  println!("== {} ==", detail.title);
  println!("URL: {}", detail.url);
  if !detail.summary.is_empty() {
    println!("Summary: {}", detail.summary);
  }
  match render_quiz_data(&detail.full_quiz_data) {
    Ok(payload) => match serde_json::to_string_pretty(&payload) {
      Ok(json) => println!("Quiz data:\n{}", json),
      Err(e) => println!("Quiz data unavailable: {}", e),
    },
    Err(e) => println!("Quiz data unavailable: {}", e),
  }
  println!();
  println!("Use `close` to dismiss.");
}

fn print_help() {
  println!("Commands:");
  println!("  generate <url>      generate a quiz from a Wikipedia article");
  println!("  view                show questions with answers revealed");
  println!("  take                attempt the quiz (answers hidden)");
  println!("  answer <q> <opt>    select option <opt> for question <q>");
  println!("  submit              score the current attempt");
  println!("  history             list previously generated quizzes");
  println!("  detail <id>         inspect one past quiz");
  println!("  close               dismiss the detail view");
  println!("  quit                exit");
}

fn prompt() -> std::io::Result<()> {
  print!("> ");
  std::io::stdout().flush()
}
