//! Workflow phases.
//!
//! ```text
//! idle → ideas_loaded → draft_pending → draft_ready → exported  ─┐
//!                             ↑               │    └──→ published ├→ ideas_loaded
//!                             └───────────────┘    └──→ discarded ┘
//! ```
//!
//! The controller derives its phase from the draft slot, the flight gate, and
//! the last draft outcome rather than storing it, so the phase can never
//! disagree with the data.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    IdeasLoaded,
    DraftPending,
    DraftReady,
    Exported,
    Published,
    Discarded,
}

impl WorkflowPhase {
    /// Phases that may be observed next from the current phase.
    ///
    /// Besides the operation steps this covers a store snapshot emptying or
    /// filling the idea list, and a failed approval falling back to whatever
    /// the draft slot still holds.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::IdeasLoaded, Self::DraftPending],
            Self::IdeasLoaded => &[Self::DraftPending, Self::Idle],
            Self::DraftPending => &[Self::DraftReady, Self::Exported, Self::IdeasLoaded, Self::Idle],
            Self::DraftReady => &[
                Self::DraftPending,
                Self::Exported,
                Self::Published,
                Self::Discarded,
            ],
            Self::Exported => &[Self::DraftPending, Self::Published, Self::Discarded],
            Self::Published | Self::Discarded => &[Self::IdeasLoaded, Self::Idle, Self::DraftPending],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::IdeasLoaded => "ideas_loaded",
            Self::DraftPending => "draft_pending",
            Self::DraftReady => "draft_ready",
            Self::Exported => "exported",
            Self::Published => "published",
            Self::Discarded => "discarded",
        }
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(WorkflowPhase::Published)]
    #[case(WorkflowPhase::Discarded)]
    fn outcomes_return_to_ideas(#[case] outcome: WorkflowPhase) {
        assert!(outcome.can_transition_to(WorkflowPhase::IdeasLoaded));
        assert!(outcome.can_transition_to(WorkflowPhase::Idle));
        assert!(!outcome.can_transition_to(WorkflowPhase::DraftReady));
    }

    #[test]
    fn idle_cannot_skip_to_draft() {
        assert!(!WorkflowPhase::Idle.can_transition_to(WorkflowPhase::DraftReady));
        assert!(!WorkflowPhase::Idle.can_transition_to(WorkflowPhase::Published));
    }

    #[rstest]
    #[case(WorkflowPhase::DraftReady)]
    #[case(WorkflowPhase::Exported)]
    #[case(WorkflowPhase::IdeasLoaded)]
    fn failed_approval_falls_back(#[case] fallback: WorkflowPhase) {
        assert!(WorkflowPhase::DraftPending.can_transition_to(fallback));
    }

    #[test]
    fn export_cannot_be_undone() {
        assert!(WorkflowPhase::Exported.can_transition_to(WorkflowPhase::Published));
        assert!(!WorkflowPhase::Exported.can_transition_to(WorkflowPhase::DraftReady));
    }
}
