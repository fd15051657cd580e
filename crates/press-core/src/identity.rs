use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity of the active session, stamped onto published articles.
///
/// Supplied at construction time from configuration; no auth logic lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionIdentity {
    /// Application namespace used in collection paths.
    pub app_id: String,
    /// Author of anything published in this session.
    pub user_id: String,
}

impl SessionIdentity {
    pub fn new(app_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Collection path holding this user's private ideas.
    #[must_use]
    pub fn ideas_path(&self) -> String {
        format!("artifacts/{}/users/{}/article_ideas", self.app_id, self.user_id)
    }

    /// Collection path holding the application's published articles.
    #[must_use]
    pub fn articles_path(&self) -> String {
        format!("artifacts/{}/public/data/articles", self.app_id)
    }
}
