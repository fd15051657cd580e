//! Single-flight gate for controller operations.
//!
//! At most one mutating operation runs at a time. Acquisition is a
//! check-and-set under a mutex; the returned [`FlightGuard`] releases the gate
//! when dropped, so every exit path (success, error, cancelled future) frees it.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::WorkflowError;

/// Class of operation holding the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    GenerateIdeas,
    ApproveIdea,
    RejectIdea,
    DiscardDraft,
    ExportDraft,
    CopyContent,
    PublishDraft,
    PublishExternal,
    FetchTrends,
    Sync,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GenerateIdeas => "generate_ideas",
            Self::ApproveIdea => "approve_idea",
            Self::RejectIdea => "reject_idea",
            Self::DiscardDraft => "discard_draft",
            Self::ExportDraft => "export_draft",
            Self::CopyContent => "copy_content",
            Self::PublishDraft => "publish_draft",
            Self::PublishExternal => "publish_external",
            Self::FetchTrends => "fetch_trends",
            Self::Sync => "sync",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    Idle,
    Running(OperationKind),
}

#[derive(Debug)]
pub struct FlightGate {
    state: Mutex<FlightState>,
}

impl Default for FlightGate {
    fn default() -> Self {
        Self {
            state: Mutex::new(FlightState::Idle),
        }
    }
}

impl FlightGate {
    fn lock(&self) -> MutexGuard<'_, FlightState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the gate for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Busy`] naming the operation already running.
    pub fn try_acquire(&self, kind: OperationKind) -> Result<FlightGuard<'_>, WorkflowError> {
        let mut state = self.lock();
        match *state {
            FlightState::Running(running) => {
                tracing::debug!(requested = %kind, %running, "operation rejected, gate busy");
                Err(WorkflowError::Busy { running })
            }
            FlightState::Idle => {
                *state = FlightState::Running(kind);
                Ok(FlightGuard { gate: self, kind })
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> FlightState {
        *self.lock()
    }
}

/// Proof that the holder owns the gate. Releases it on drop.
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct FlightGuard<'a> {
    gate: &'a FlightGate,
    kind: OperationKind,
}

impl FlightGuard<'_> {
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *self.gate.lock() = FlightState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_busy_until_release() {
        let gate = FlightGate::default();
        let guard = gate.try_acquire(OperationKind::GenerateIdeas).unwrap();
        assert_eq!(gate.state(), FlightState::Running(OperationKind::GenerateIdeas));

        let err = gate.try_acquire(OperationKind::PublishDraft).err().unwrap();
        assert!(matches!(
            err,
            WorkflowError::Busy {
                running: OperationKind::GenerateIdeas
            }
        ));

        drop(guard);
        assert_eq!(gate.state(), FlightState::Idle);
        assert!(gate.try_acquire(OperationKind::PublishDraft).is_ok());
    }

    #[test]
    fn guard_released_on_early_return() {
        fn fails(gate: &FlightGate) -> Result<(), WorkflowError> {
            let _guard = gate.try_acquire(OperationKind::ApproveIdea)?;
            Err(WorkflowError::NoDraft)
        }
        let gate = FlightGate::default();
        assert!(fails(&gate).is_err());
        assert_eq!(gate.state(), FlightState::Idle);
    }
}
