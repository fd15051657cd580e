//! Prompt builders for the generative collaborator.

use std::fmt::Write as _;

use press_core::entities::{Idea, TrendItem};
use press_core::enums::Flair;
use serde_json::{Value, json};

use crate::settings::WorkflowSettings;

/// Inputs for one idea-generation round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaRequest {
    /// Recent community discussion titles to draw inspiration from.
    pub trend_titles: Vec<String>,
}

impl IdeaRequest {
    #[must_use]
    pub fn with_trends(trends: &[TrendItem]) -> Self {
        Self {
            trend_titles: trends.iter().map(|t| t.title.clone()).collect(),
        }
    }
}

#[must_use]
pub fn idea_prompt(settings: &WorkflowSettings, request: &IdeaRequest) -> String {
    let mut prompt = format!(
        "Generate {count} attractive and valuable article title ideas for a Reddit community \
         named r/{community}, focused on growth strategies for small businesses and \
         entrepreneurs in the USA, using free or low-cost resources. Articles should be \
         practical and actionable.\n",
        count = settings.idea_count,
        community = settings.community,
    );

    let trends: Vec<&str> = request
        .trend_titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(settings.trend_limit)
        .collect();
    if !trends.is_empty() {
        prompt.push_str(
            "\nThese discussions are currently popular in the community. Use them as \
             inspiration, without copying their titles:\n",
        );
        for title in trends {
            let _ = writeln!(prompt, "- {title}");
        }
    }

    prompt.push_str("\nAssign each idea to one of the following flairs:\n");
    for flair in Flair::ALL {
        let _ = writeln!(prompt, "- {}", flair.label());
    }
    prompt.push_str(
        "\nOutput format JSON:\n\
         [\n    \
         { \"title\": \"Idea Title 1\", \"flair\": \"Corresponding Flair\" },\n    \
         { \"title\": \"Idea Title 2\", \"flair\": \"Corresponding Flair\" },\n    \
         ...\n\
         ]",
    );
    prompt
}

/// Response schema for the idea prompt, in the generator's schema dialect.
#[must_use]
pub fn idea_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "flair": { "type": "STRING", "enum": Flair::labels() }
            },
            "required": ["title", "flair"],
            "propertyOrdering": ["title", "flair"]
        }
    })
}

const DRAFT_TEMPLATE: &str = "\
Hey, fellow entrepreneurs!

[Generate a brief and catchy introduction here, grabbing attention and presenting the problem/benefit.]

**The Challenge:** [Generate content here that contextualizes the common situation small businesses face.]

**[Generate a compelling subtitle for the Solution/Guide - IN BOLD]**

[Generate the content for the \"Solution\" with practical tactics, tips, and strategies. Use bullet points for steps or key takeaways.]
* **Step-by-Step or Key Points:** Break down information into easy-to-follow sections.
* **Brief Examples/Hypothetical Cases:** Illustrate points with scenarios that resonate with entrepreneurs.
* **Pro-Tip/Common Pitfalls:** Share warnings and shortcuts based on experience.

**Free/Low-Cost Resources Mentioned:**

* [Resource 1]: Brief description and why it's valuable.
* [Resource 2]: Brief description and why it's valuable.
(Ensure these are resources from reliable companies and mostly free or low-cost).

**Your Turn:**

[Generate a Call-to-Action (CTA) here to encourage the community to comment, share experiences, or ask questions.]

**Conclusion:** [Generate a brief final summary of the benefit or main idea.]";


#[must_use]
pub fn draft_prompt(settings: &WorkflowSettings, idea: &Idea) -> String {
    format!(
        "Write a detailed and valuable article in ENGLISH for the Reddit community \
         r/{community}, with the title \"**{title}**\" and under the flair \"{flair}\".\n\
         The article must be practical, actionable, and focused on growth strategies for small \
         businesses and entrepreneurs in the USA, leveraging free or low-cost online resources.\n\
         Ensure that the main article title and ALL subtitles within the body of the article are \
         in **bold Markdown** (using **text**).\n\
         Make the language engaging, conversational, and easy to read. Use varied sentence \
         structures and clear, concise points.\n\
         Do NOT include any bracketed instructions like \"[Generate content here]\" or \"---\" \
         separators in the final article output. Generate the actual content directly for each \
         section.\n\
         \n\
         Follow this structure:\n\
         \n\
         **{title}**\n\
         \n\
         {template}\n\
         \n\
         The content should be attractive, easy to read, and highly useful. The tone should be \
         optimistic and empowering.\n",
        community = settings.community,
        title = idea.title,
        flair = idea.flair.label(),
        template = DRAFT_TEMPLATE,
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use press_clean::PatternSet;

    use super::*;

    fn settings() -> WorkflowSettings {
        WorkflowSettings {
            community: "smallbiz".to_string(),
            idea_count: 3,
            trend_limit: 2,
            ..WorkflowSettings::default()
        }
    }

    #[test]
    fn idea_prompt_names_community_count_and_flairs() {
        let prompt = idea_prompt(&settings(), &IdeaRequest::default());
        assert!(prompt.starts_with("Generate 3 attractive"));
        assert!(prompt.contains("r/smallbiz"));
        for flair in Flair::ALL {
            assert!(prompt.contains(flair.label()), "missing {flair}");
        }
        assert!(!prompt.contains("currently popular"));
    }

    #[test]
    fn idea_prompt_lists_trends_up_to_limit() {
        let request = IdeaRequest {
            trend_titles: vec![
                "Is TikTok worth it?".to_string(),
                "   ".to_string(),
                "Free CRM picks".to_string(),
                "Third trend".to_string(),
            ],
        };
        let prompt = idea_prompt(&settings(), &request);
        assert!(prompt.contains("- Is TikTok worth it?\n"));
        assert!(prompt.contains("- Free CRM picks\n"));
        assert!(!prompt.contains("Third trend"));
    }

    #[test]
    fn schema_constrains_flair_to_known_labels() {
        let schema = idea_schema();
        let labels = schema["items"]["properties"]["flair"]["enum"].as_array().unwrap();
        assert_eq!(labels.len(), Flair::ALL.len());
        assert_eq!(labels[0], Flair::GrowthHacks.label());
    }

    #[test]
    fn draft_prompt_embeds_title_and_flair() {
        let idea = Idea::pending("ide-1", "Email on a budget", Flair::FreebieFinders, Utc::now());
        let prompt = draft_prompt(&settings(), &idea);
        assert!(prompt.contains("with the title \"**Email on a budget**\""));
        assert!(prompt.contains("under the flair \"💡 Freebie Fortune Finders\""));
        assert!(prompt.contains("\n**Email on a budget**\n"));
        assert!(prompt.contains(DRAFT_TEMPLATE));
    }

    #[test]
    fn builtin_patterns_cover_every_template_line() {
        let patterns = PatternSet::builtin();
        for line in DRAFT_TEMPLATE.lines().filter(|l| !l.trim().is_empty()) {
            assert!(
                patterns.matching(line).is_some(),
                "template line not recognised: {line}"
            );
        }
    }
}
