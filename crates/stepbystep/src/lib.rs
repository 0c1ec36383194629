//! Stepbystep
//!
//! A small, synchronous step orchestration engine. A [`Workflow`] takes an
//! ordered [`WorkflowModel`] of [`StepModel`]s, asks a [`StepFactory`] to
//! turn each model into a [`Step`], and drives every step through its
//! lifecycle:
//!
//! ```text
//!   build & register   (all steps, in order)
//!   prepare            (all steps)
//!   prompt             (all steps)
//!   per step: prepare_before_run → prompt_before_run → run
//!             → prompt_after_run → cleanup_after_run
//!   cleanup            (all steps)
//! ```
//!
//! Each step gets its own [`StepRunContext`] and shares a
//! [`WorkflowRunContext`]. Step contexts can be looked up by registration
//! index, model name, model identity or step identity.
//!
//! # Usage
//!
//! ```ignore
//! use stepbystep::{StepModel, StepRegistry, Workflow, WorkflowModel};
//!
//! let mut registry = StepRegistry::new();
//! registry.register("greet", |_| Box::new(GreetStep));
//!
//! let model = WorkflowModel::from_iter([StepModel::new("greet")]);
//! let context = Workflow::new(model, registry).run()?;
//! ```

mod context;
mod error;
mod events;
mod factory;
mod model;
mod registry;
mod run_context;
pub mod solver;
mod step;
mod steps;
mod workflow;

pub use context::{ContextStore, StepRunContext};
pub use error::{ContextError, StepError, WorkflowError};
pub use events::{
  ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier, RecordingNotifier,
};
pub use factory::StepFactory;
pub use model::{ModelKey, StepConfig, StepModel, WorkflowModel};
pub use registry::StepRegistry;
pub use run_context::{StepId, StepKey, WorkflowRunContext};
pub use step::{Phase, Step, StepContext, invoke_phase};
pub use steps::NoopStep;
pub use workflow::Workflow;
