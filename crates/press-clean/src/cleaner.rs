//! The line-oriented cleaning pass.

use crate::pattern::PatternSet;

/// Optional per-article context for cleaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanContext<'a> {
    /// Article title. When set, copies of it at the top of the text are dropped.
    pub title: Option<&'a str>,
}

impl<'a> CleanContext<'a> {
    #[must_use]
    pub const fn with_title(title: &'a str) -> Self {
        Self { title: Some(title) }
    }
}

/// Configured cleaner: a pattern set plus the title-stripping switch.
#[derive(Debug, Clone)]
pub struct Cleaner {
    patterns: PatternSet,
    strip_title: bool,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(PatternSet::builtin().clone())
    }
}

impl Cleaner {
    #[must_use]
    pub const fn new(patterns: PatternSet) -> Self {
        Self {
            patterns,
            strip_title: true,
        }
    }

    /// Enable or disable dropping a duplicated leading title.
    #[must_use]
    pub const fn strip_title(mut self, enabled: bool) -> Self {
        self.strip_title = enabled;
        self
    }

    #[must_use]
    pub const fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Clean generated text.
    ///
    /// 1. Drop every line matching a scaffold pattern in full.
    /// 2. With a title in context, drop title copies heading the survivors.
    /// 3. Collapse runs of blank lines to a single blank line.
    /// 4. Trim blank lines from both ends.
    ///
    /// Surviving lines are kept verbatim and in order.
    #[must_use]
    pub fn clean(&self, raw: &str, ctx: &CleanContext<'_>) -> String {
        let survivors: Vec<&str> = raw
            .split('\n')
            .filter(|line| match self.patterns.matching(line) {
                Some(pattern) => {
                    tracing::trace!(
                        pattern = pattern.name(),
                        category = ?pattern.category(),
                        line,
                        "dropping scaffold line"
                    );
                    false
                }
                None => true,
            })
            .collect();

        let title = ctx
            .title
            .map(str::trim)
            .filter(|t| self.strip_title && !t.is_empty());
        let body = match title {
            Some(title) => skip_leading_titles(&survivors, title),
            None => &survivors[..],
        };

        let collapsed = collapse_blank_runs(body);
        trim_blank_edges(&collapsed).join("\n")
    }
}

/// Clean with the built-in pattern set.
#[must_use]
pub fn clean(raw: &str, ctx: &CleanContext<'_>) -> String {
    Cleaner::default().clean(raw, ctx)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_title_line(line: &str, title: &str) -> bool {
    let line = line.trim();
    line == title
        || line
            .strip_prefix("**")
            .and_then(|rest| rest.strip_suffix("**"))
            .is_some_and(|inner| inner.trim() == title)
}

// Removes every title copy and blank line before the first other line, so a
// second pass cannot find a new leading title.
fn skip_leading_titles<'a, 'b>(lines: &'b [&'a str], title: &str) -> &'b [&'a str] {
    let start = lines
        .iter()
        .position(|line| !is_blank(line) && !is_title_line(line, title))
        .unwrap_or(lines.len());
    &lines[start..]
}

fn collapse_blank_runs<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = Vec::with_capacity(lines.len());
    for &line in lines {
        let prev_blank = out.last().is_some_and(|prev| is_blank(prev));
        if !(is_blank(line) && prev_blank) {
            out.push(line);
        }
    }
    out
}

fn trim_blank_edges<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let Some(start) = lines.iter().position(|line| !is_blank(line)) else {
        return &[];
    };
    let end = lines
        .iter()
        .rposition(|line| !is_blank(line))
        .map_or(start, |i| i + 1);
    &lines[start..end]
}
