use std::sync::Arc;

use crate::model::StepModel;
use crate::run_context::WorkflowRunContext;
use crate::step::Step;
use crate::workflow::Workflow;

/// Builds [`Step`] implementations for the step models it supports.
pub trait StepFactory {
  /// Build a fresh step for `model`, or `None` if this factory does not
  /// support it.
  fn build_step(
    &self,
    model: &Arc<StepModel>,
    workflow: &Workflow,
    context: &WorkflowRunContext,
  ) -> Option<Box<dyn Step>>;
}

impl<F> StepFactory for F
where
  F: Fn(&Arc<StepModel>, &Workflow, &WorkflowRunContext) -> Option<Box<dyn Step>>,
{
  fn build_step(
    &self,
    model: &Arc<StepModel>,
    workflow: &Workflow,
    context: &WorkflowRunContext,
  ) -> Option<Box<dyn Step>> {
    self(model, workflow, context)
  }
}
