//! Content cleaner configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const fn default_strip_title() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanerConfig {
    /// Drop a duplicated title line at the top of generated content.
    #[serde(default = "default_strip_title")]
    pub strip_title: bool,

    /// Additional TOML pattern files appended to the built-in set.
    #[serde(default)]
    pub extra_patterns: Vec<PathBuf>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            strip_title: default_strip_title(),
            extra_patterns: Vec::new(),
        }
    }
}
