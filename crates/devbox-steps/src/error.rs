use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
  /// A requested step is not in the configured workflow.
  #[error("step {name} is not part of the workflow")]
  NotInWorkflow { name: String },
}
