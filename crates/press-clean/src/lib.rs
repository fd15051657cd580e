//! # press-clean
//!
//! Strips prompt-template scaffolding out of generated article text.
//!
//! The cleaner is a line filter: every line that matches a scaffold pattern in
//! full is dropped, an optional duplicated title at the top is removed, blank
//! runs collapse to one blank line, and blank lines at either end are trimmed.
//! It never fails and is idempotent.
//!
//! Patterns are data. The built-in set ships as `patterns/scaffold.toml`;
//! callers add more with [`PatternSet::from_toml_str`] or
//! [`PatternSet::load_file`] and [`PatternSet::extend`].
//!
//! ```
//! use press_clean::{clean, CleanContext};
//!
//! let raw = "Hey, fellow entrepreneurs!\n\n\n\nGrowth comes from consistency.\n---";
//! assert_eq!(clean(raw, &CleanContext::default()), "Growth comes from consistency.");
//! ```

mod cleaner;
mod error;
mod pattern;

pub use cleaner::{CleanContext, Cleaner, clean};
pub use error::PatternError;
pub use pattern::{PatternCategory, PatternSet, ScaffoldPattern};
