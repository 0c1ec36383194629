//! Workflow construction and the global run protocol.

use tracing::{debug, error, info, instrument};

use crate::error::WorkflowError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::factory::StepFactory;
use crate::model::WorkflowModel;
use crate::run_context::{StepId, WorkflowRunContext};
use crate::step::{Phase, Step, StepContext, invoke_phase};

/// A step built for the current run, in build order.
struct BuiltStep {
  id: StepId,
  index: usize,
  name: String,
  step: Box<dyn Step>,
}

/// Runs the steps declared in a [`WorkflowModel`], built by a
/// [`StepFactory`].
pub struct Workflow {
  model: WorkflowModel,
  factory: Box<dyn StepFactory>,
  notifier: Box<dyn ExecutionNotifier>,
}

impl Workflow {
  pub fn new(model: WorkflowModel, factory: impl StepFactory + 'static) -> Self {
    Self {
      model,
      factory: Box::new(factory),
      notifier: Box::new(NoopNotifier),
    }
  }

  /// Attach a notifier receiving every [`ExecutionEvent`] of later runs.
  pub fn with_notifier(mut self, notifier: impl ExecutionNotifier + 'static) -> Self {
    self.notifier = Box::new(notifier);
    self
  }

  pub fn model(&self) -> &WorkflowModel {
    &self.model
  }

  /// The model may be extended between runs; each run reads it afresh.
  pub fn model_mut(&mut self) -> &mut WorkflowModel {
    &mut self.model
  }

  pub fn factory(&self) -> &dyn StepFactory {
    self.factory.as_ref()
  }

  /// Run every step declared in the model.
  ///
  /// Steps are built and registered in model order. Then `prepare` runs
  /// for all steps, then `prompt` for all steps. Each step then runs its
  /// run sequence (`prepare_before_run` through `cleanup_after_run`)
  /// before the next step starts. Finally `cleanup` runs for all steps.
  ///
  /// The first failure ends the run. Nothing already done is rolled back.
  /// On success the run context is handed back to the caller.
  #[instrument(name = "workflow_run", skip(self), fields(steps = self.model.len()))]
  pub fn run(&self) -> Result<WorkflowRunContext, WorkflowError> {
    let mut context = WorkflowRunContext::new();

    info!(steps = self.model.len(), "workflow_started");
    self.notifier.notify(ExecutionEvent::WorkflowStarted {
      steps: self.model.len(),
    });

    let result = self
      .build_steps(&mut context)
      .and_then(|mut steps| self.run_steps(&mut context, &mut steps));

    match &result {
      Ok(()) => {
        info!("workflow_completed");
        self.notifier.notify(ExecutionEvent::WorkflowCompleted);
      }
      Err(e) => {
        error!(error = %e, "workflow_failed");
        self.notifier.notify(ExecutionEvent::WorkflowFailed {
          error: e.to_string(),
        });
      }
    }

    result.map(|()| context)
  }

  /// Build and register one step per model, in order.
  fn build_steps(&self, context: &mut WorkflowRunContext) -> Result<Vec<BuiltStep>, WorkflowError> {
    let mut steps = Vec::with_capacity(self.model.len());

    for (index, model) in self.model.steps().iter().enumerate() {
      let step = self
        .factory
        .build_step(model, self, context)
        .ok_or_else(|| WorkflowError::UndefinedStep {
          index,
          name: model.name.clone(),
        })?;

      let id = context.register_step(model);
      debug!(step_index = index, step_name = %model.name, "step_built");
      self.notifier.notify(ExecutionEvent::StepBuilt {
        index,
        name: model.name.clone(),
      });

      steps.push(BuiltStep {
        id,
        index,
        name: model.name.clone(),
        step,
      });
    }

    Ok(steps)
  }

  fn run_steps(
    &self,
    context: &mut WorkflowRunContext,
    steps: &mut [BuiltStep],
  ) -> Result<(), WorkflowError> {
    for built in steps.iter_mut() {
      self.invoke(context, built, Phase::Prepare)?;
    }

    for built in steps.iter_mut() {
      self.invoke(context, built, Phase::Prompt)?;
    }

    for built in steps.iter_mut() {
      for phase in Phase::RUN_SEQUENCE {
        self.invoke(context, built, phase)?;
      }
    }

    for built in steps.iter_mut() {
      self.invoke(context, built, Phase::Cleanup)?;
    }

    Ok(())
  }

  fn invoke(
    &self,
    context: &mut WorkflowRunContext,
    built: &mut BuiltStep,
    phase: Phase,
  ) -> Result<(), WorkflowError> {
    debug!(step_index = built.index, step_name = %built.name, %phase, "phase_started");
    self.notifier.notify(ExecutionEvent::PhaseStarted {
      index: built.index,
      name: built.name.clone(),
      phase,
    });

    let mut cx = StepContext::registered(self, context, built.id);
    match invoke_phase(built.step.as_mut(), phase, &mut cx) {
      Ok(()) => {
        self.notifier.notify(ExecutionEvent::PhaseCompleted {
          index: built.index,
          name: built.name.clone(),
          phase,
        });
        Ok(())
      }
      Err(e) => {
        error!(
          step_index = built.index,
          step_name = %built.name,
          %phase,
          error = %e,
          "step_failed"
        );
        self.notifier.notify(ExecutionEvent::PhaseFailed {
          index: built.index,
          name: built.name.clone(),
          phase,
          error: e.to_string(),
        });
        Err(WorkflowError::Step(e))
      }
    }
  }
}

impl std::fmt::Debug for Workflow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Workflow")
      .field("model", &self.model)
      .finish_non_exhaustive()
  }
}
