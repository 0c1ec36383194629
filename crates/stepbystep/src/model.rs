//! Declarative descriptions of steps and workflows.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Step configuration. Only the concrete step interprets it.
pub type StepConfig = BTreeMap<String, Value>;

/// A step model: a name the factory uses to pick the step implementation,
/// and that step's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepModel {
  pub name: String,
  #[serde(default)]
  pub config: StepConfig,
}

impl StepModel {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      config: StepConfig::new(),
    }
  }

  pub fn with_config(name: impl Into<String>, config: StepConfig) -> Self {
    Self {
      name: name.into(),
      config,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn config(&self) -> &StepConfig {
    &self.config
  }
}

/// Identity of a shared [`StepModel`] allocation.
///
/// Two keys are equal only when they come from the same `Arc`, regardless of
/// the models' contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelKey(usize);

impl ModelKey {
  pub fn of(model: &Arc<StepModel>) -> Self {
    Self(Arc::as_ptr(model) as usize)
  }
}

/// An ordered list of step models. The order is the run order.
#[derive(Debug, Clone, Default)]
pub struct WorkflowModel {
  steps: Vec<Arc<StepModel>>,
}

impl WorkflowModel {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a model, returning the shared handle stored in the workflow.
  pub fn push(&mut self, model: StepModel) -> Arc<StepModel> {
    let model = Arc::new(model);
    self.steps.push(Arc::clone(&model));
    model
  }

  /// Append an already shared model. Pushing the same `Arc` twice yields two
  /// steps that share one model identity.
  pub fn push_shared(&mut self, model: Arc<StepModel>) {
    self.steps.push(model);
  }

  pub fn steps(&self) -> &[Arc<StepModel>] {
    &self.steps
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

impl FromIterator<StepModel> for WorkflowModel {
  fn from_iter<I: IntoIterator<Item = StepModel>>(iter: I) -> Self {
    Self {
      steps: iter.into_iter().map(Arc::new).collect(),
    }
  }
}

impl FromIterator<Arc<StepModel>> for WorkflowModel {
  fn from_iter<I: IntoIterator<Item = Arc<StepModel>>>(iter: I) -> Self {
    Self {
      steps: iter.into_iter().collect(),
    }
  }
}
