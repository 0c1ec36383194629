//! Synchronous command execution.

use std::ffi::OsStr;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{CommandError, map_stderr};
use crate::which::which;

/// Run `command` (program followed by its arguments) and return its stdout.
///
/// Fails with [`CommandError::UnknownCommand`] when the program is not on
/// the PATH. Any output on stderr is a failure ([`CommandError::Stderr`]),
/// whatever the exit status; tools that print warnings to stderr are
/// reported as failed too.
pub fn execute<S: AsRef<OsStr>>(command: &[S]) -> Result<String, CommandError> {
  let (program, args) = command.split_first().ok_or(CommandError::EmptyCommand)?;
  let name = program.as_ref().to_string_lossy().into_owned();

  let path = which(program).ok_or_else(|| CommandError::unknown(&name))?;
  debug!(program = %name, path = %path.display(), args = args.len(), "command_started");

  let output = Command::new(&path)
    .args(args)
    .output()
    .map_err(|source| CommandError::Spawn {
      program: name.clone(),
      source,
    })?;

  if !output.stderr.is_empty() {
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    warn!(program = %name, status = %output.status, stderr = %stderr.trim_end(), "command_failed");
    return Err(CommandError::Stderr {
      program: name,
      stderr,
    });
  }

  debug!(program = %name, status = %output.status, "command_completed");
  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Like [`execute`], but stderr output is reported through `on_stderr` as
/// the caller's own error type.
pub fn execute_with<S, E, F>(command: &[S], on_stderr: F) -> Result<String, E>
where
  S: AsRef<OsStr>,
  E: From<CommandError>,
  F: FnOnce(String) -> E,
{
  map_stderr(execute(command), on_stderr)
}
