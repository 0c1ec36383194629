//! Workflow-scoped run context and the step context indexes.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::slice;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::context::{ContextStore, StepRunContext};
use crate::model::{ModelKey, StepModel};
use crate::solver;

static NEXT_STEP_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identity of a registered step instance.
///
/// Minted by [`WorkflowRunContext::register_step`]; never reused within a
/// process, so an id from one run never matches a step of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(u64);

impl StepId {
  fn next() -> Self {
    Self(NEXT_STEP_ID.fetch_add(1, Ordering::Relaxed))
  }
}

/// Key used to look up step run contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKey<'a> {
  /// Position in registration order, starting at 0.
  Index(usize),
  /// Step model name. Not unique.
  Name(&'a str),
  /// Step model identity.
  Model(ModelKey),
  /// Step instance identity.
  Step(StepId),
}

impl From<usize> for StepKey<'_> {
  fn from(index: usize) -> Self {
    StepKey::Index(index)
  }
}

impl<'a> From<&'a str> for StepKey<'a> {
  fn from(name: &'a str) -> Self {
    StepKey::Name(name)
  }
}

impl<'a> From<&'a String> for StepKey<'a> {
  fn from(name: &'a String) -> Self {
    StepKey::Name(name.as_str())
  }
}

impl From<&Arc<StepModel>> for StepKey<'_> {
  fn from(model: &Arc<StepModel>) -> Self {
    StepKey::Model(ModelKey::of(model))
  }
}

impl From<ModelKey> for StepKey<'_> {
  fn from(key: ModelKey) -> Self {
    StepKey::Model(key)
  }
}

impl From<StepId> for StepKey<'_> {
  fn from(id: StepId) -> Self {
    StepKey::Step(id)
  }
}

#[derive(Debug)]
struct RegisteredStep {
  id: StepId,
  index: usize,
  model: Arc<StepModel>,
  context: StepRunContext,
}

/// Context of a workflow run.
///
/// Derefs to a [`ContextStore`] holding workflow-wide state, and owns one
/// [`StepRunContext`] per registered step. Step contexts are stored by
/// instance identity; registration index, model name and model identity are
/// auxiliary indexes over the same ids.
#[derive(Debug, Default)]
pub struct WorkflowRunContext {
  data: ContextStore,
  steps: HashMap<StepId, RegisteredStep>,
  by_index: Vec<StepId>,
  by_model_name: HashMap<String, Vec<StepId>>,
  by_model: HashMap<ModelKey, Vec<StepId>>,
}

impl WorkflowRunContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a step built from `model`, creating its empty run context.
  ///
  /// Must be called exactly once per step instance, before any of its
  /// lifecycle phases run. The returned id keys the new context.
  pub fn register_step(&mut self, model: &Arc<StepModel>) -> StepId {
    let id = StepId::next();
    let index = self.by_index.len();

    self.by_index.push(id);
    self
      .by_model_name
      .entry(model.name.clone())
      .or_default()
      .push(id);
    self.by_model.entry(ModelKey::of(model)).or_default().push(id);
    self.steps.insert(
      id,
      RegisteredStep {
        id,
        index,
        model: Arc::clone(model),
        context: StepRunContext::new(),
      },
    );

    debug!(step_index = index, step_name = %model.name, "step_registered");
    id
  }

  /// Number of registered steps.
  pub fn step_count(&self) -> usize {
    self.by_index.len()
  }

  /// Ids of every registered step matching `key`, in registration order.
  pub fn step_ids<'k>(&self, key: impl Into<StepKey<'k>>) -> &[StepId] {
    match key.into() {
      StepKey::Index(index) => self
        .by_index
        .get(index)
        .map(slice::from_ref)
        .unwrap_or(&[]),
      StepKey::Name(name) => self
        .by_model_name
        .get(name)
        .map(Vec::as_slice)
        .unwrap_or(&[]),
      StepKey::Model(model) => self
        .by_model
        .get(&model)
        .map(Vec::as_slice)
        .unwrap_or(&[]),
      StepKey::Step(id) => self
        .steps
        .get(&id)
        .map(|entry| slice::from_ref(&entry.id))
        .unwrap_or(&[]),
    }
  }

  /// Context of the most recently registered step matching `key`.
  pub fn step<'k>(&self, key: impl Into<StepKey<'k>>) -> Option<&StepRunContext> {
    self.step_with(key, solver::latest)
  }

  /// Context of the step picked by `solver` among those matching `key`.
  ///
  /// The solver is not called when nothing matches.
  pub fn step_with<'k, F>(&self, key: impl Into<StepKey<'k>>, solver: F) -> Option<&StepRunContext>
  where
    F: FnOnce(&[StepId]) -> Option<StepId>,
  {
    let id = self.solve(key.into(), solver)?;
    self.steps.get(&id).map(|entry| &entry.context)
  }

  /// Mutable variant of [`step`](Self::step).
  pub fn step_mut<'k>(&mut self, key: impl Into<StepKey<'k>>) -> Option<&mut StepRunContext> {
    self.step_mut_with(key, solver::latest)
  }

  /// Mutable variant of [`step_with`](Self::step_with).
  pub fn step_mut_with<'k, F>(
    &mut self,
    key: impl Into<StepKey<'k>>,
    solver: F,
  ) -> Option<&mut StepRunContext>
  where
    F: FnOnce(&[StepId]) -> Option<StepId>,
  {
    let id = self.solve(key.into(), solver)?;
    self.steps.get_mut(&id).map(|entry| &mut entry.context)
  }

  /// Contexts of every step matching `key`, in registration order.
  pub fn steps<'k>(&self, key: impl Into<StepKey<'k>>) -> Vec<&StepRunContext> {
    self
      .step_ids(key)
      .iter()
      .filter_map(|id| self.steps.get(id))
      .map(|entry| &entry.context)
      .collect()
  }

  /// Model the step was built from.
  pub fn model(&self, id: StepId) -> Option<&Arc<StepModel>> {
    self.steps.get(&id).map(|entry| &entry.model)
  }

  /// Registration index of the step.
  pub fn index_of(&self, id: StepId) -> Option<usize> {
    self.steps.get(&id).map(|entry| entry.index)
  }

  pub fn is_registered(&self, id: StepId) -> bool {
    self.steps.contains_key(&id)
  }

  fn solve<F>(&self, key: StepKey<'_>, solver: F) -> Option<StepId>
  where
    F: FnOnce(&[StepId]) -> Option<StepId>,
  {
    let ids = self.step_ids(key);
    if ids.is_empty() {
      return None;
    }
    solver(ids)
  }

  // `StepContext` only holds ids checked with `is_registered`, and
  // registrations are never removed.
  pub(crate) fn registered_model(&self, id: StepId) -> &Arc<StepModel> {
    match self.steps.get(&id) {
      Some(entry) => &entry.model,
      None => unreachable!("step {id:?} is not registered"),
    }
  }

  pub(crate) fn registered_context(&self, id: StepId) -> &StepRunContext {
    match self.steps.get(&id) {
      Some(entry) => &entry.context,
      None => unreachable!("step {id:?} is not registered"),
    }
  }

  pub(crate) fn registered_context_mut(&mut self, id: StepId) -> &mut StepRunContext {
    match self.steps.get_mut(&id) {
      Some(entry) => &mut entry.context,
      None => unreachable!("step {id:?} is not registered"),
    }
  }
}

impl Deref for WorkflowRunContext {
  type Target = ContextStore;

  fn deref(&self) -> &ContextStore {
    &self.data
  }
}

impl DerefMut for WorkflowRunContext {
  fn deref_mut(&mut self) -> &mut ContextStore {
    &mut self.data
  }
}
