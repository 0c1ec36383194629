//! The step lifecycle and the handle steps use to reach their run state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::StepRunContext;
use crate::error::StepError;
use crate::model::StepModel;
use crate::run_context::{StepId, WorkflowRunContext};
use crate::workflow::Workflow;

/// A step lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  Prepare,
  Prompt,
  PrepareBeforeRun,
  PromptBeforeRun,
  Run,
  PromptAfterRun,
  CleanupAfterRun,
  Cleanup,
}

impl Phase {
  /// Phases run back to back for one step before the next step starts.
  pub const RUN_SEQUENCE: [Phase; 5] = [
    Phase::PrepareBeforeRun,
    Phase::PromptBeforeRun,
    Phase::Run,
    Phase::PromptAfterRun,
    Phase::CleanupAfterRun,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Phase::Prepare => "prepare",
      Phase::Prompt => "prompt",
      Phase::PrepareBeforeRun => "prepare_before_run",
      Phase::PromptBeforeRun => "prompt_before_run",
      Phase::Run => "run",
      Phase::PromptAfterRun => "prompt_after_run",
      Phase::CleanupAfterRun => "cleanup_after_run",
      Phase::Cleanup => "cleanup",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A unit of work executed by a [`Workflow`].
///
/// Only [`run`](Step::run) is required. Every other phase defaults to doing
/// nothing.
pub trait Step {
  /// Gather facts automatically, before any prompting.
  fn prepare(&mut self, _cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
  }

  /// Ask the user for missing inputs the run needs.
  fn prompt(&mut self, _cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
  }

  /// Last automated gathering just before `run`.
  fn prepare_before_run(&mut self, _cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
  }

  /// Last prompt just before `run`.
  fn prompt_before_run(&mut self, _cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
  }

  /// Perform the task described by the step model.
  fn run(&mut self, cx: &mut StepContext<'_>) -> Result<(), StepError>;

  /// Prompt just after `run`.
  fn prompt_after_run(&mut self, _cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
  }

  /// Cleanup just after `run`, before the next step runs.
  fn cleanup_after_run(&mut self, _cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
  }

  /// Final cleanup, once every step has run.
  fn cleanup(&mut self, _cx: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
  }
}

/// Invoke the lifecycle method matching `phase`.
pub fn invoke_phase(
  step: &mut dyn Step,
  phase: Phase,
  cx: &mut StepContext<'_>,
) -> Result<(), StepError> {
  match phase {
    Phase::Prepare => step.prepare(cx),
    Phase::Prompt => step.prompt(cx),
    Phase::PrepareBeforeRun => step.prepare_before_run(cx),
    Phase::PromptBeforeRun => step.prompt_before_run(cx),
    Phase::Run => step.run(cx),
    Phase::PromptAfterRun => step.prompt_after_run(cx),
    Phase::CleanupAfterRun => step.cleanup_after_run(cx),
    Phase::Cleanup => step.cleanup(cx),
  }
}

/// What a step sees during a phase: its owning workflow, its own run
/// context, and the shared workflow run context.
///
/// Holds borrows only; the workflow owns the steps and the run context.
pub struct StepContext<'a> {
  workflow: &'a Workflow,
  run_context: &'a mut WorkflowRunContext,
  id: StepId,
}

impl<'a> StepContext<'a> {
  /// Build a handle for a step registered in `run_context`.
  ///
  /// Returns `None` if `id` was not registered there.
  pub fn new(
    workflow: &'a Workflow,
    run_context: &'a mut WorkflowRunContext,
    id: StepId,
  ) -> Option<Self> {
    if !run_context.is_registered(id) {
      return None;
    }
    Some(Self::registered(workflow, run_context, id))
  }

  pub(crate) fn registered(
    workflow: &'a Workflow,
    run_context: &'a mut WorkflowRunContext,
    id: StepId,
  ) -> Self {
    Self {
      workflow,
      run_context,
      id,
    }
  }

  pub fn id(&self) -> StepId {
    self.id
  }

  /// The model this step was built from.
  pub fn model(&self) -> &Arc<StepModel> {
    self.run_context.registered_model(self.id)
  }

  pub fn workflow(&self) -> &Workflow {
    self.workflow
  }

  /// This step's own run context.
  pub fn context(&self) -> &StepRunContext {
    self.run_context.registered_context(self.id)
  }

  pub fn context_mut(&mut self) -> &mut StepRunContext {
    self.run_context.registered_context_mut(self.id)
  }

  /// The run context shared by every step of the workflow.
  pub fn workflow_context(&self) -> &WorkflowRunContext {
    self.run_context
  }

  pub fn workflow_context_mut(&mut self) -> &mut WorkflowRunContext {
    self.run_context
  }
}
