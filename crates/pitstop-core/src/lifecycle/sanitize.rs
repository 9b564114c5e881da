//! Input sanitizing for free-form text.

use regex::Regex;

use crate::error::{ChecklistError, Result};

const MARKUP_TAG_PATTERN: &str = r"<[^>]*>";

/// Strip markup tags from notes and trim surrounding whitespace.
///
/// # Examples
///
/// ```rust
/// use pitstop_core::lifecycle::sanitize::sanitize_notes;
///
/// assert_eq!(sanitize_notes("  <b>brakes</b> worn ")?, "brakes worn");
/// # pitstop_core::Result::<()>::Ok(())
/// ```
pub fn sanitize_notes(notes: &str) -> Result<String> {
    let re = Regex::new(MARKUP_TAG_PATTERN).map_err(|e| ChecklistError::Configuration {
        message: format!("Failed to compile markup pattern: {e}"),
    })?;
    Ok(re.replace_all(notes, "").trim().to_string())
}
