use thiserror::Error;

/// Error returned by a step lifecycle phase.
///
/// Steps raise their own domain errors; the workflow carries them to the
/// caller without wrapping so they can be recovered with `downcast_ref`.
pub type StepError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by a [`ContextStore`](crate::ContextStore).
#[derive(Debug, Error)]
pub enum ContextError {
  /// The key is not present in the store.
  #[error("key not found: {0}")]
  KeyNotFound(String),

  /// The stored value could not be converted to the requested type.
  #[error("invalid value for key '{key}': {source}")]
  InvalidValue {
    key: String,
    #[source]
    source: serde_json::Error,
  },
}

/// Errors that end a [`Workflow::run`](crate::Workflow::run).
#[derive(Debug, Error)]
pub enum WorkflowError {
  /// The step factory declined to build a step for this model.
  #[error("undefined step '{name}' at position {index}")]
  UndefinedStep { index: usize, name: String },

  /// A step lifecycle phase failed. The step's error is carried unchanged.
  #[error(transparent)]
  Step(StepError),
}

impl WorkflowError {
  /// Borrow the step's own error if this is a phase failure.
  pub fn step_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
    match self {
      WorkflowError::Step(e) => Some(e.as_ref()),
      WorkflowError::UndefinedStep { .. } => None,
    }
  }

  /// Take the step's own error if this is a phase failure.
  pub fn into_step_error(self) -> Option<StepError> {
    match self {
      WorkflowError::Step(e) => Some(e),
      WorkflowError::UndefinedStep { .. } => None,
    }
  }
}
