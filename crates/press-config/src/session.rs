//! Session identity configuration.

use press_core::identity::SessionIdentity;
use serde::{Deserialize, Serialize};

fn default_app_id() -> String {
    "default-app-id".to_string()
}

fn default_user_id() -> String {
    "local-dev-user".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_app_id")]
    pub app_id: String,

    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            user_id: default_user_id(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity::new(&self.app_id, &self.user_id)
    }
}
