//! Terminal host capability: blocking questions and progress lines.
//!
//! [`StdTerminal`] talks to the real stdin/stdout. [`ScriptedTerminal`]
//! replays canned answers and records everything, for tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

/// Errors raised while prompting.
#[derive(Debug, Error)]
pub enum TerminalError {
  /// No more input is available.
  #[error("input closed while waiting for an answer")]
  Closed,

  #[error("terminal io error: {0}")]
  Io(#[from] io::Error),
}

/// Interaction with the user running the installer.
pub trait Terminal: Send + Sync {
  /// Ask a question and block until the user answers. The trailing line
  /// break is stripped; the answer may be empty.
  fn ask(&self, question: &str) -> Result<String, TerminalError>;

  /// Print a progress line.
  fn say(&self, line: &str);
}

/// Terminal backed by the process stdin and stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdTerminal;

impl Terminal for StdTerminal {
  fn ask(&self, question: &str) -> Result<String, TerminalError> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "? {question} ")?;
    stdout.flush()?;

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer)? == 0 {
      return Err(TerminalError::Closed);
    }
    Ok(strip_line_break(answer))
  }

  fn say(&self, line: &str) {
    println!("{line}");
  }
}

fn strip_line_break(mut answer: String) -> String {
  while answer.ends_with('\n') || answer.ends_with('\r') {
    answer.pop();
  }
  answer
}

/// Terminal replaying canned answers in order.
///
/// Once the answers run out, `ask` fails with [`TerminalError::Closed`].
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
  answers: Mutex<VecDeque<String>>,
  questions: Mutex<Vec<String>>,
  lines: Mutex<Vec<String>>,
}

impl ScriptedTerminal {
  pub fn new<I, S>(answers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
      ..Self::default()
    }
  }

  /// Questions asked so far.
  pub fn questions(&self) -> Vec<String> {
    self
      .questions
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Progress lines printed so far.
  pub fn lines(&self) -> Vec<String> {
    self
      .lines
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}

impl Terminal for ScriptedTerminal {
  fn ask(&self, question: &str) -> Result<String, TerminalError> {
    self
      .questions
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(question.to_string());

    let answer = self
      .answers
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .pop_front();
    debug!(question, answered = answer.is_some(), "scripted_answer");
    answer.ok_or(TerminalError::Closed)
  }

  fn say(&self, line: &str) {
    self
      .lines
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(line.to_string());
  }
}
