//! Workflow error types.

use press_core::errors::{CollaboratorError, CoreError};
use thiserror::Error;

use crate::flight::OperationKind;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Another state-mutating operation holds the flight gate.
    #[error("{running} is already in progress")]
    Busy { running: OperationKind },

    /// The operation needs a current draft and there is none.
    #[error("no article draft")]
    NoDraft,

    #[error("idea {0} not found")]
    IdeaNotFound(String),

    #[error("no trend source configured")]
    NoTrendSource,

    /// Data model rule violated (for example approving a rejected idea).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An external collaborator failed. State is left as it was before the call.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
