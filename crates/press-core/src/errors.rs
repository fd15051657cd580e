//! Cross-cutting error types for Pressroom.
//!
//! `CoreError` covers invariant violations on the data model.
//! `CollaboratorError` is what every external collaborator reports back to the
//! workflow, regardless of which concrete client or store produced it.

use thiserror::Error;

/// Errors raised by data model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failure reported by an external collaborator.
///
/// None of these are fatal to the process. The workflow surfaces them as a
/// message and leaves its state at the last consistent point.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The upstream service (generator, relay, trend fetch) failed.
    #[error("{service} error: {message}")]
    Upstream { service: String, message: String },

    /// The upstream service answered with something we could not interpret.
    #[error("{service} returned a malformed response: {message}")]
    Malformed { service: String, message: String },

    /// The document store rejected a read or write.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl CollaboratorError {
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn malformed(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            service: service.into(),
            message: message.into(),
        }
    }
}
