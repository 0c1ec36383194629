use std::path::PathBuf;

use crate::error::CommandError;
use crate::execute::execute;
use crate::which::which;

/// Command execution as seen by steps.
///
/// Implemented by [`SystemCommandRunner`] for real processes; tests supply
/// their own implementations.
pub trait CommandRunner: Send + Sync {
  /// Resolve a program on the PATH.
  fn which(&self, program: &str) -> Option<PathBuf>;

  /// Execute `command` with the semantics of [`execute`].
  fn run(&self, command: &[String]) -> Result<String, CommandError>;

  /// Whether `program` can be found on the PATH.
  fn is_available(&self, program: &str) -> bool {
    self.which(program).is_some()
  }
}

/// Runs real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
  fn which(&self, program: &str) -> Option<PathBuf> {
    which(program)
  }

  fn run(&self, command: &[String]) -> Result<String, CommandError> {
    execute(command)
  }
}
