//! Orchestrator state machine.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// States of a single launch.
///
/// `Done` and `Aborted` are terminal. `Aborted` is only reachable from
/// `Building` or `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchState {
    Idle,
    Probing,
    SpawningServer,
    SkippingSpawn,
    Building,
    Running,
    Done,
    Aborted,
}

impl LaunchState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Whether `self -> next` is an edge of the state machine.
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Probing)
                | (Self::Probing, Self::SpawningServer | Self::SkippingSpawn)
                | (Self::SpawningServer | Self::SkippingSpawn, Self::Building)
                | (Self::Building, Self::Running | Self::Aborted)
                | (Self::Running, Self::Done | Self::Aborted)
        )
    }
}

/// Ordered record of the states a launch passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTrace {
    states: Vec<LaunchState>,
}

impl Default for StateTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl StateTrace {
    /// Start a trace in `Idle`.
    pub fn new() -> Self {
        Self {
            states: vec![LaunchState::Idle],
        }
    }

    pub fn current(&self) -> LaunchState {
        // Never empty: `new` seeds Idle and nothing removes entries
        self.states.last().copied().unwrap_or(LaunchState::Idle)
    }

    /// Move to `next`.
    ///
    /// Illegal edges are a programming error in the orchestrator and trip a
    /// debug assertion.
    pub fn advance(&mut self, next: LaunchState) {
        let current = self.current();
        debug_assert!(
            current.can_advance_to(next),
            "illegal launch transition {current:?} -> {next:?}"
        );
        debug!(from = ?current, to = ?next, "launch state transition");
        self.states.push(next);
    }

    pub fn states(&self) -> &[LaunchState] {
        &self.states
    }

    pub fn into_states(self) -> Vec<LaunchState> {
        self.states
    }
}
