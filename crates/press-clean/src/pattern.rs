//! Scaffold pattern definitions and the ordered pattern set.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::PatternError;

const BUILTIN_PATTERNS: &str = include_str!("../patterns/scaffold.toml");

static BUILTIN: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::from_toml_str(BUILTIN_PATTERNS).expect("built-in scaffold patterns should compile")
});

/// What kind of template leftover a pattern recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Separator,
    Greeting,
    Placeholder,
    SectionHeader,
    InstructionBullet,
    ResourcePlaceholder,
    #[serde(other)]
    Custom,
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    #[serde(default)]
    pattern: Vec<PatternSpec>,
}

#[derive(Debug, Deserialize)]
struct PatternSpec {
    name: String,
    #[serde(default = "default_category")]
    category: PatternCategory,
    regex: String,
}

const fn default_category() -> PatternCategory {
    PatternCategory::Custom
}

/// One compiled full-line matcher.
#[derive(Debug, Clone)]
pub struct ScaffoldPattern {
    name: String,
    category: PatternCategory,
    regex: Regex,
}

impl ScaffoldPattern {
    /// Compile `body` as a whole-line matcher tolerant of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Regex`] if `body` is not a valid regex.
    pub fn new(
        name: impl Into<String>,
        category: PatternCategory,
        body: &str,
    ) -> Result<Self, PatternError> {
        let name = name.into();
        let regex = Regex::new(&format!(r"^\s*(?:{body})\s*$")).map_err(|source| {
            PatternError::Regex {
                name: name.clone(),
                source,
            }
        })?;
        Ok(Self {
            name,
            category,
            regex,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn category(&self) -> PatternCategory {
        self.category
    }

    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// Ordered list of scaffold patterns. The first match wins.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<ScaffoldPattern>,
}

impl PatternSet {
    /// The patterns for the built-in draft template.
    ///
    /// # Panics
    ///
    /// Panics on first use if the embedded pattern file fails to compile,
    /// which the crate's tests rule out.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parse and compile a pattern file.
    ///
    /// ```toml
    /// [[pattern]]
    /// name = "greeting"
    /// category = "greeting"
    /// regex = 'Hey, fellow entrepreneurs!'
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for malformed TOML or an invalid regex.
    pub fn from_toml_str(src: &str) -> Result<Self, PatternError> {
        let file: PatternFile = toml::from_str(src)?;
        let patterns = file
            .pattern
            .into_iter()
            .map(|entry| ScaffoldPattern::new(entry.name, entry.category, &entry.regex))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Read and compile a pattern file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load_file(path: &Path) -> Result<Self, PatternError> {
        let src = std::fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    /// Append `other`'s patterns after this set's.
    pub fn extend(&mut self, other: Self) {
        self.patterns.extend(other.patterns);
    }

    /// First pattern matching `line`, if any.
    #[must_use]
    pub fn matching(&self, line: &str) -> Option<&ScaffoldPattern> {
        self.patterns.iter().find(|p| p.matches(line))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn builtin_set_compiles() {
        assert_eq!(PatternSet::builtin().len(), 13);
    }

    #[rstest]
    #[case("---", "separator")]
    #[case("   ***  ", "separator")]
    #[case("Hey, fellow entrepreneurs!", "greeting")]
    #[case(
        "**The Challenge:** [Generate content here that contextualizes the common situation small businesses face.]",
        "challenge-lead-in"
    )]
    #[case("**[Generate a compelling subtitle for the Solution/Guide - IN BOLD]**", "solution-subtitle")]
    #[case("**[Generate a compelling subtitle for the Solution/Guía - IN BOLD]**", "solution-subtitle")]
    #[case("**Free/Low-Cost Resources Mentioned:**", "resources-header")]
    #[case("**Your Turn:**", "your-turn-header")]
    #[case(
        "**Conclusion:** [Generate a brief final summary of the benefit or main idea.]",
        "conclusion-lead-in"
    )]
    #[case(
        "[Generate a brief and catchy introduction here, grabbing attention and presenting the problem/benefit.]",
        "generate-placeholder"
    )]
    #[case(
        "* **Step-by-Step or Key Points:** Break down information into easy-to-follow sections.",
        "steps-bullet"
    )]
    #[case(
        "* **Brief Examples/Hypothetical Cases:** Illustrate points with scenarios that resonate with entrepreneurs.",
        "examples-bullet"
    )]
    #[case(
        "* **Pro-Tip/Common Pitfalls:** Share warnings and shortcuts based on experience.",
        "pro-tip-bullet"
    )]
    #[case("* [Resource 2]: Brief description and why it's valuable.", "resource-placeholder")]
    #[case("[Resource 12]: Brief description and why it's valuable.", "resource-placeholder")]
    #[case(
        "(Ensure these are resources from reliable companies and mostly free or low-cost).",
        "resource-disclaimer"
    )]
    fn builtin_patterns_match_template_lines(#[case] line: &str, #[case] expected: &str) {
        let hit = PatternSet::builtin().matching(line).expect("line should match");
        assert_eq!(hit.name(), expected);
    }

    #[rstest]
    #[case("Hey, fellow entrepreneurs! Today we talk about SEO.")]
    #[case("**The Challenge:** Most owners wear every hat at once.")]
    #[case("**Conclusion:** Start small and stay consistent.")]
    #[case("* **Google Business Profile:** Free and easy to set up.")]
    #[case("Growth comes from consistency.")]
    #[case("-- not quite a rule")]
    #[case("")]
    fn builtin_patterns_leave_authored_lines(#[case] line: &str) {
        assert!(PatternSet::builtin().matching(line).is_none());
    }

    #[test]
    fn custom_toml_patterns_are_appended() {
        let mut set = PatternSet::builtin().clone();
        let extra = PatternSet::from_toml_str(
            r#"
[[pattern]]
name = "tldr-placeholder"
regex = '\(TL;DR goes here\)'
"#,
        )
        .unwrap();
        set.extend(extra);
        let hit = set.matching("  (TL;DR goes here)").unwrap();
        assert_eq!(hit.name(), "tldr-placeholder");
        assert_eq!(hit.category(), PatternCategory::Custom);
    }

    #[test]
    fn invalid_regex_names_the_pattern() {
        let err = PatternSet::from_toml_str(
            r#"
[[pattern]]
name = "broken"
regex = '(unclosed'
"#,
        )
        .unwrap_err();
        assert!(matches!(err, PatternError::Regex { ref name, .. } if name == "broken"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PatternSet::load_file(Path::new("/nonexistent/patterns.toml")).unwrap_err();
        assert!(matches!(err, PatternError::Io { .. }));
    }
}
