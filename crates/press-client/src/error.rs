//! Client error types.

use press_core::errors::CollaboratorError;
use thiserror::Error;

/// Errors that can occur when talking to an HTTP collaborator.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited - retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A success response did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Structured output could not be parsed as JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Classify into the collaborator taxonomy under `service`.
    #[must_use]
    pub fn into_collaborator(self, service: &str) -> CollaboratorError {
        match self {
            Self::Http(e) if e.is_decode() => CollaboratorError::malformed(service, e.to_string()),
            Self::UnexpectedResponse(_) | Self::Parse(_) => {
                CollaboratorError::malformed(service, self.to_string())
            }
            Self::Http(_) | Self::Api { .. } | Self::RateLimited { .. } => {
                CollaboratorError::upstream(service, self.to_string())
            }
        }
    }
}
