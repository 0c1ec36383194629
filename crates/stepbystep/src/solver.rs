//! Tie-break functions for lookups that match several step contexts.
//!
//! A solver receives the matching step ids in registration order and picks
//! one of them.

use crate::run_context::StepId;

/// Pick the most recently registered match.
pub fn latest(ids: &[StepId]) -> Option<StepId> {
  ids.last().copied()
}

/// Pick the earliest registered match.
pub fn first(ids: &[StepId]) -> Option<StepId> {
  ids.first().copied()
}
