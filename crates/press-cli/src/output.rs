use press_core::entities::{Draft, Idea, PublishedArticle, TrendItem};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response in the requested format. `text` supplies
/// the human-readable form.
pub fn render<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Text => Ok(text(value)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    let rendered = render(value, format, text)?;
    println!("{rendered}");
    Ok(())
}

pub fn idea_lines(ideas: &[Idea]) -> String {
    if ideas.is_empty() {
        return String::from("(no ideas)");
    }
    ideas
        .iter()
        .map(|idea| format!("{}  [{}]  {}  ({})", idea.id, idea.status, idea.title, idea.flair))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn article_lines(articles: &[PublishedArticle]) -> String {
    if articles.is_empty() {
        return String::from("(no articles)");
    }
    articles
        .iter()
        .map(|article| {
            format!(
                "{}  {}  {}  ({})",
                article.id,
                article.published_at.format("%Y-%m-%d %H:%M"),
                article.title,
                article.flair
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn trend_lines(trends: &[TrendItem]) -> String {
    if trends.is_empty() {
        return String::from("(no trends)");
    }
    trends
        .iter()
        .map(|trend| format!("{:>6} pts {:>5} comments  {}", trend.score, trend.num_comments, trend.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn draft_text(draft: &Draft, body: &str) -> String {
    format!("{}\n{}\n\n{body}", draft.title, draft.flair)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use press_core::enums::Flair;
    use serde_json::json;

    use super::*;

    #[test]
    fn raw_is_compact_json() {
        let rendered = render(&json!({"a": 1}), OutputFormat::Raw, |_| String::new()).unwrap();
        assert_eq!(rendered, r#"{"a":1}"#);
    }

    #[test]
    fn text_uses_the_supplied_renderer() {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let ideas = vec![Idea::pending("ide-00000001", "Free CRMs", Flair::FreebieFinders, created)];
        let rendered = render(&ideas[..], OutputFormat::Text, idea_lines).unwrap();
        assert_eq!(
            rendered,
            "ide-00000001  [pending]  Free CRMs  (💡 Freebie Fortune Finders)"
        );
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(article_lines(&[]), "(no articles)");
        assert_eq!(trend_lines(&[]), "(no trends)");
    }
}
