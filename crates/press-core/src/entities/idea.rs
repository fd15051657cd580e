use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Flair, IdeaStatus};
use crate::errors::CoreError;

/// A suggested article title awaiting a decision.
///
/// Everything except `status` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub flair: Flair,
    pub status: IdeaStatus,
    pub created_at: DateTime<Utc>,
}

impl Idea {
    /// Create a new idea in the `pending` state.
    pub fn pending(
        id: impl Into<String>,
        title: impl Into<String>,
        flair: Flair,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            flair,
            status: IdeaStatus::Pending,
            created_at,
        }
    }

    /// Move to `next`, enforcing the status state machine.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if `next` is not reachable.
    pub fn transition(&mut self, next: IdeaStatus) -> Result<(), CoreError> {
        self.check_transition(next)?;
        self.status = next;
        Ok(())
    }

    /// Validate a transition without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if `next` is not reachable.
    pub fn check_transition(&self, next: IdeaStatus) -> Result<(), CoreError> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                entity_type: "idea".to_string(),
                id: self.id.clone(),
                from: self.status.to_string(),
                to: next.to_string(),
            })
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == IdeaStatus::Pending
    }
}

/// One `{title, flair}` pair as returned by the structured idea prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GeneratedIdea {
    pub title: String,
    pub flair: String,
}

impl GeneratedIdea {
    /// Validate the pair and resolve its flair.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for an empty title or unknown flair.
    pub fn validate(&self) -> Result<(String, Flair), CoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("idea title is empty".to_string()));
        }
        let flair = self.flair.parse::<Flair>()?;
        Ok((title.to_string(), flair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea() -> Idea {
        Idea::pending("ide-00000001", "Free SEO wins", Flair::GrowthHacks, Utc::now())
    }

    #[test]
    fn rejected_idea_cannot_be_approved() {
        let mut idea = idea();
        idea.transition(IdeaStatus::Rejected).unwrap();
        let err = idea.transition(IdeaStatus::Approved).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(idea.status, IdeaStatus::Rejected);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(idea()).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn generated_idea_trims_title() {
        let raw = GeneratedIdea {
            title: "  Grow with email  ".into(),
            flair: "💡 Freebie Fortune Finders".into(),
        };
        let (title, flair) = raw.validate().unwrap();
        assert_eq!(title, "Grow with email");
        assert_eq!(flair, Flair::FreebieFinders);
    }

    #[test]
    fn generated_idea_with_blank_title_is_invalid() {
        let raw = GeneratedIdea {
            title: "   ".into(),
            flair: "💡 Freebie Fortune Finders".into(),
        };
        assert!(raw.validate().is_err());
    }
}
