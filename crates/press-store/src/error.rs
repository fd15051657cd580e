//! Store error types.

use press_core::errors::{CollaboratorError, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure reading or appending a collection log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// `update` named a record that does not exist.
    #[error("document {id} not found in {path}")]
    NotFound { path: String, id: String },

    /// The collection path is empty or escapes the store root.
    #[error("invalid collection path '{0}'")]
    InvalidPath(String),

    /// Unsupported log record version.
    #[error("unsupported log version {version} in {path}")]
    UnsupportedVersion { path: String, version: u32 },

    /// ID generation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<StoreError> for CollaboratorError {
    fn from(error: StoreError) -> Self {
        Self::Persistence(error.to_string())
    }
}
