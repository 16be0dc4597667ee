//! Per-instance lifecycle: `Parsed → Installing → Installed → Activating → Activated`.

use std::fmt;

use tokio::sync::RwLock;

use crate::Error;

/// Where a worker instance is in its lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkerState {
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
}

impl WorkerState {
    /// The single state this one may advance to.
    pub fn next(self) -> Option<WorkerState> {
        match self {
            WorkerState::Parsed => Some(WorkerState::Installing),
            WorkerState::Installing => Some(WorkerState::Installed),
            WorkerState::Installed => Some(WorkerState::Activating),
            WorkerState::Activating => Some(WorkerState::Activated),
            WorkerState::Activated => None,
        }
    }

    /// Only an activated worker intercepts fetches.
    pub fn is_controlling(self) -> bool {
        self == WorkerState::Activated
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkerState::Parsed => "parsed",
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared, lock-guarded lifecycle state for one manager instance.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    state: RwLock<WorkerState>,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self { state: RwLock::new(WorkerState::Parsed) }
    }

    pub(crate) async fn current(&self) -> WorkerState {
        *self.state.read().await
    }

    /// Move from `expected` to its successor.
    ///
    /// The check and the write happen under one lock, so two racing
    /// install events cannot both leave `Parsed`.
    pub(crate) async fn advance(&self, expected: WorkerState) -> Result<WorkerState, Error> {
        let mut state = self.state.write().await;
        if *state != expected {
            return Err(Error::InvalidState(format!("expected {expected}, worker is {}", *state)));
        }
        let next = expected
            .next()
            .ok_or_else(|| Error::InvalidState(format!("{expected} is terminal")))?;
        tracing::debug!(from = %expected, to = %next, "worker state transition");
        *state = next;
        Ok(next)
    }
}
