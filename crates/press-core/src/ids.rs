//! Prefixed identifier generation.
//!
//! IDs look like `ide-a3f8b2c1`: a three-letter entity prefix and eight hex
//! characters drawn from four random bytes.

use crate::errors::CoreError;

pub const PREFIX_IDEA: &str = "ide";
pub const PREFIX_ARTICLE: &str = "art";
pub const PREFIX_DOCUMENT: &str = "doc";

/// Generate a fresh ID with the given prefix.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the OS random source is unavailable.
pub fn generate(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Validation(format!("failed to generate id: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}
