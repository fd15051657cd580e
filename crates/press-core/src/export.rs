//! Single-line CSV serialization for clipboard export.
//!
//! A field is wrapped in double quotes, with internal quotes doubled, only when
//! it contains a comma, a quote, or a newline. Fields are joined with commas.

use std::borrow::Cow;

/// Escape one CSV field.
#[must_use]
pub fn csv_field(text: &str) -> Cow<'_, str> {
    if text.contains(|c| matches!(c, ',' | '"' | '\n')) {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(text)
    }
}

/// Escape and comma-join a row of fields.
#[must_use]
pub fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",")
}
