//! Execution events and notifiers for observing a workflow run.
//!
//! Notifiers only observe: they cannot alter control flow, and a failing
//! phase still ends the run with the step's own error.

use std::cell::RefCell;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::step::Phase;

/// Events emitted during a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// The run started; `steps` models will be built.
  WorkflowStarted { steps: usize },

  /// A step was built and registered.
  StepBuilt { index: usize, name: String },

  /// A lifecycle phase started for a step.
  PhaseStarted {
    index: usize,
    name: String,
    phase: Phase,
  },

  /// A lifecycle phase completed for a step.
  PhaseCompleted {
    index: usize,
    name: String,
    phase: Phase,
  },

  /// A lifecycle phase failed; the run stops.
  PhaseFailed {
    index: usize,
    name: String,
    phase: Phase,
    error: String,
  },

  /// Every phase of every step completed.
  WorkflowCompleted,

  /// The run ended with an error.
  WorkflowFailed { error: String },
}

/// Receives execution events.
pub trait ExecutionNotifier {
  fn notify(&self, event: ExecutionEvent);
}

/// Discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// Sends events to a channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::Sender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::Sender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
  events: RefCell<Vec<ExecutionEvent>>,
}

impl RecordingNotifier {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn events(&self) -> Vec<ExecutionEvent> {
    self.events.borrow().clone()
  }
}

impl ExecutionNotifier for RecordingNotifier {
  fn notify(&self, event: ExecutionEvent) {
    self.events.borrow_mut().push(event);
  }
}

impl<N: ExecutionNotifier + ?Sized> ExecutionNotifier for std::rc::Rc<N> {
  fn notify(&self, event: ExecutionEvent) {
    (**self).notify(event);
  }
}
