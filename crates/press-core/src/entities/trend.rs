use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A popular community post, used only as inspiration for idea prompts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrendItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub permalink: String,
}
