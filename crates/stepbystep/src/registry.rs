//! Name-keyed step factory.

use std::collections::HashMap;
use std::sync::Arc;

use crate::factory::StepFactory;
use crate::model::StepModel;
use crate::run_context::WorkflowRunContext;
use crate::step::Step;
use crate::workflow::Workflow;

type StepConstructor = Box<dyn Fn(&Arc<StepModel>) -> Box<dyn Step>>;

/// A [`StepFactory`] that maps step model names to constructors.
///
/// Models whose name has no registered constructor are declined.
#[derive(Default)]
pub struct StepRegistry {
  constructors: HashMap<String, StepConstructor>,
}

impl StepRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a constructor for `name`, replacing any previous one.
  pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
  where
    F: Fn(&Arc<StepModel>) -> Box<dyn Step> + 'static,
  {
    self.constructors.insert(name.into(), Box::new(constructor));
    self
  }

  pub fn contains(&self, name: &str) -> bool {
    self.constructors.contains_key(name)
  }

  /// Registered names, sorted.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }
}

impl StepFactory for StepRegistry {
  fn build_step(
    &self,
    model: &Arc<StepModel>,
    _workflow: &Workflow,
    _context: &WorkflowRunContext,
  ) -> Option<Box<dyn Step>> {
    self
      .constructors
      .get(&model.name)
      .map(|constructor| constructor(model))
  }
}

impl std::fmt::Debug for StepRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepRegistry")
      .field("names", &self.names())
      .finish()
  }
}
