use thiserror::Error;

/// Errors that can occur when executing a command.
#[derive(Debug, Error)]
pub enum CommandError {
  /// No program was given.
  #[error("empty command")]
  EmptyCommand,

  /// The program could not be found on the PATH.
  #[error("command {program} not found")]
  UnknownCommand { program: String },

  /// The program was found but could not be started.
  #[error("failed to start {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The program wrote to stderr, which counts as a failure.
  #[error("{program} failed: {stderr}")]
  Stderr { program: String, stderr: String },
}

impl CommandError {
  pub fn unknown(program: impl Into<String>) -> Self {
    Self::UnknownCommand {
      program: program.into(),
    }
  }
}

/// Route the stderr failure of `result` through `on_stderr`; every other
/// error converts into `E` unchanged.
pub fn map_stderr<E, F>(result: Result<String, CommandError>, on_stderr: F) -> Result<String, E>
where
  E: From<CommandError>,
  F: FnOnce(String) -> E,
{
  match result {
    Ok(stdout) => Ok(stdout),
    Err(CommandError::Stderr { stderr, .. }) => Err(on_stderr(stderr)),
    Err(e) => Err(E::from(e)),
  }
}
