use crate::error::StepError;
use crate::step::{Step, StepContext};

/// A step that performs nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStep;

impl Step for NoopStep {
  fn run(&mut self, _cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
  }
}
