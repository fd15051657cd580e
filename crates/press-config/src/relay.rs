//! Backend relay configuration (publishing and trend fetch).

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://reddit-api-worker.growmybisznow.workers.dev".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Worker origin; routes are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional bearer token for the worker.
    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RelayConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }
}
