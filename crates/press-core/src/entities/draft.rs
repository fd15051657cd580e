use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Idea, PublishedArticle};
use crate::enums::{DraftStatus, Flair};

/// The single in-progress article. Title and flair are copied from the
/// originating idea; `idea_id` is a lookup reference only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub title: String,
    pub flair: Flair,
    /// Raw generated Markdown, uncleaned.
    pub content: String,
    pub status: DraftStatus,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub idea_id: String,
}

impl Draft {
    pub fn from_idea(idea: &Idea, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            title: idea.title.clone(),
            flair: idea.flair,
            content: content.into(),
            status: DraftStatus::Draft,
            created_at,
            published_at: None,
            idea_id: idea.id.clone(),
        }
    }

    /// Build the published record for this draft without consuming it, so a
    /// failed write can leave the draft in place.
    #[must_use]
    pub fn to_published(
        &self,
        id: impl Into<String>,
        author_id: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> PublishedArticle {
        PublishedArticle {
            id: id.into(),
            title: self.title.clone(),
            flair: self.flair,
            content: self.content.clone(),
            status: DraftStatus::Published,
            created_at: self.created_at,
            published_at,
            idea_id: self.idea_id.clone(),
            author_id: author_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_copies_idea_fields() {
        let idea = Idea::pending("ide-0000000a", "Cash flow basics", Flair::ProfitPathways, Utc::now());
        let draft = Draft::from_idea(&idea, "body", Utc::now());
        assert_eq!(draft.title, idea.title);
        assert_eq!(draft.flair, idea.flair);
        assert_eq!(draft.idea_id, idea.id);
        assert_eq!(draft.status, DraftStatus::Draft);
        assert!(draft.published_at.is_none());
    }

    #[test]
    fn published_record_carries_author_and_timestamp() {
        let idea = Idea::pending("ide-0000000b", "Local SEO", Flair::DigitalPlaybook, Utc::now());
        let draft = Draft::from_idea(&idea, "text", Utc::now());
        let now = Utc::now();
        let article = draft.to_published("art-00000001", "u-1", now);
        assert_eq!(article.status, DraftStatus::Published);
        assert_eq!(article.author_id, "u-1");
        assert_eq!(article.published_at, now);
        assert_eq!(article.content, draft.content);
    }
}
