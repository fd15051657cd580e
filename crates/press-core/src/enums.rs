//! Status enums and the flair enumeration for Pressroom.
//!
//! Status enums use `snake_case` serialization and provide
//! `allowed_next_states()` to enforce valid transitions at the application layer.
//! `Flair` serializes as its display label, matching what the generator emits.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// IdeaStatus
// ---------------------------------------------------------------------------

/// Status of an article idea.
///
/// ```text
/// pending → approved
///         → rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    Pending,
    Approved,
    Rejected,
}

impl IdeaStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved | Self::Rejected => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DraftStatus
// ---------------------------------------------------------------------------

/// Status of an article draft.
///
/// ```text
/// draft → published
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Draft,
    Published,
}

impl DraftStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Flair
// ---------------------------------------------------------------------------

/// Category label attached to every idea, draft, and article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Flair {
    #[serde(rename = "🚀 Growth Hacks & Breakthroughs")]
    GrowthHacks,
    #[serde(rename = "💡 Freebie Fortune Finders")]
    FreebieFinders,
    #[serde(rename = "📈 Digital Domination Playbook")]
    DigitalPlaybook,
    #[serde(rename = "💸 Profit Pathways & Funding Funnel")]
    ProfitPathways,
}

impl Flair {
    pub const ALL: [Self; 4] = [
        Self::GrowthHacks,
        Self::FreebieFinders,
        Self::DigitalPlaybook,
        Self::ProfitPathways,
    ];

    /// Full label including the leading emoji.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GrowthHacks => "🚀 Growth Hacks & Breakthroughs",
            Self::FreebieFinders => "💡 Freebie Fortune Finders",
            Self::DigitalPlaybook => "📈 Digital Domination Playbook",
            Self::ProfitPathways => "💸 Profit Pathways & Funding Funnel",
        }
    }

    /// Label text without the emoji.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GrowthHacks => "Growth Hacks & Breakthroughs",
            Self::FreebieFinders => "Freebie Fortune Finders",
            Self::DigitalPlaybook => "Digital Domination Playbook",
            Self::ProfitPathways => "Profit Pathways & Funding Funnel",
        }
    }

    /// All labels, in declaration order.
    #[must_use]
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.label()).collect()
    }
}

impl fmt::Display for Flair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Flair {
    type Err = CoreError;

    /// Accepts the exact label, or the label text without its emoji
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|flair| flair.label() == s || flair.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::Validation(format!("unknown flair '{s}'")))
    }
}
