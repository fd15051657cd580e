//! Target community and generation knobs.

use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "growmybusinessnow".to_string()
}

const fn default_idea_count() -> u32 {
    5
}

const fn default_trend_limit() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommunityConfig {
    /// Community name without the `r/` prefix.
    #[serde(default = "default_name")]
    pub name: String,

    /// How many ideas each generation round asks for.
    #[serde(default = "default_idea_count")]
    pub idea_count: u32,

    /// Maximum trend titles folded into an idea prompt.
    #[serde(default = "default_trend_limit")]
    pub trend_limit: usize,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            idea_count: default_idea_count(),
            trend_limit: default_trend_limit(),
        }
    }
}
