//! Pattern loading errors. Cleaning itself is infallible.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern file is not valid TOML or does not match the pattern layout.
    #[error("invalid pattern file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A pattern's regex failed to compile.
    #[error("pattern '{name}' has an invalid regex: {source}")]
    Regex {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A pattern file could not be read.
    #[error("failed to read pattern file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
