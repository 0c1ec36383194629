use std::sync::Arc;

use devbox_config::InstallerConfig;
use serde_json::Value;
use stepbystep::{Step, StepFactory, StepModel, StepRegistry, Workflow, WorkflowModel, WorkflowRunContext};
use tracing::debug;

use crate::capabilities::Capabilities;
use crate::error::SelectionError;
use crate::git::{GIT_STEP, GitInstallAndConfigureStep};
use crate::package_manager::{PACKAGE_MANAGER_STEP, PackageManagerWindowsStep};

/// Builds the installer steps by model name, all sharing one set of
/// [`Capabilities`].
#[derive(Debug)]
pub struct InstallerStepFactory {
  registry: StepRegistry,
}

impl InstallerStepFactory {
  pub fn new(caps: Capabilities) -> Self {
    let mut registry = StepRegistry::new();

    let git_caps = caps.clone();
    registry.register(GIT_STEP, move |_| {
      Box::new(GitInstallAndConfigureStep::new(git_caps.clone()))
    });
    registry.register(PACKAGE_MANAGER_STEP, move |_| {
      Box::new(PackageManagerWindowsStep::new(caps.clone()))
    });

    Self { registry }
  }

  /// Registered step names, sorted.
  pub fn names(&self) -> Vec<&str> {
    self.registry.names()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.registry.contains(name)
  }
}

impl StepFactory for InstallerStepFactory {
  fn build_step(
    &self,
    model: &Arc<StepModel>,
    workflow: &Workflow,
    context: &WorkflowRunContext,
  ) -> Option<Box<dyn Step>> {
    self.registry.build_step(model, workflow, context)
  }
}

/// Steps run when the configuration names none.
pub fn default_step_names() -> Vec<&'static str> {
  if cfg!(windows) {
    vec![PACKAGE_MANAGER_STEP, GIT_STEP]
  } else {
    vec![GIT_STEP]
  }
}

/// The workflow described by `config`.
///
/// A disabled global admin check is forced into every package manager
/// step.
pub fn workflow_model(config: &InstallerConfig) -> WorkflowModel {
  let models: Vec<StepModel> = if config.steps.is_empty() {
    default_step_names().into_iter().map(StepModel::new).collect()
  } else {
    config
      .steps
      .iter()
      .map(|def| StepModel::with_config(def.name.clone(), def.config.clone()))
      .collect()
  };

  models
    .into_iter()
    .map(|mut model| {
      if model.name == PACKAGE_MANAGER_STEP && !config.admin_check {
        model
          .config
          .insert("admin_check".to_string(), Value::Bool(false));
      }
      debug!(step = %model.name, "step_planned");
      model
    })
    .collect()
}

/// Keep only the models named in `names`, in workflow order. An empty
/// filter keeps everything.
///
/// Fails when a name matches no step of `model`.
pub fn select_steps(
  model: WorkflowModel,
  names: &[String],
) -> Result<WorkflowModel, SelectionError> {
  if names.is_empty() {
    return Ok(model);
  }

  if let Some(missing) = names
    .iter()
    .find(|name| !model.steps().iter().any(|step| step.name == **name))
  {
    return Err(SelectionError::NotInWorkflow {
      name: missing.clone(),
    });
  }

  Ok(
    model
      .steps()
      .iter()
      .filter(|step| names.iter().any(|n| *n == step.name))
      .cloned()
      .collect(),
  )
}
