use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DraftStatus, Flair};

/// An article saved to the published history. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublishedArticle {
    pub id: String,
    pub title: String,
    pub flair: Flair,
    pub content: String,
    pub status: DraftStatus,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
    pub idea_id: String,
    pub author_id: String,
}
