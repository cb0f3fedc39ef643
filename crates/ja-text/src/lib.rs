//! JA Text - Japanese text processing
//!
//! This crate provides:
//! - Era (和暦) date labels (令和, 平成, with a 西暦 fallback)
//! - ASCII era tags for file identifiers ("R7")
//! - Full-width and kanji numeral transliteration
//! - Kinsoku-aware line wrapping by measured width
//!
//! # Example
//!
//! ```ignore
//! use ja_text::{era_tag, format_wareki_ymd, wrap_by_width};
//!
//! let label = format_wareki_ymd(2025, 9, 2); // "令和7年9月2日"
//! let tag = era_tag(&label);                  // Some("R7")
//! let lines = wrap_by_width("入学式を行いました。", 40.0, |_| 10.0);
//! ```

mod digits;
mod formatter;
mod linebreak;

pub use digits::{extract_digits, to_ascii_digits};
pub use formatter::{era_of, era_tag, era_tag_for_date, format_wareki, format_wareki_ymd, Era};
pub use linebreak::{
    can_break_between, find_break_points, is_line_end_prohibited, is_line_start_prohibited,
    wrap_by_width,
};

use thiserror::Error;

/// Errors that can occur during Japanese text processing
#[derive(Debug, Error)]
pub enum JaTextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid era label: {0}")]
    InvalidEraLabel(String),
}

/// Result type for Japanese text operations
pub type Result<T> = std::result::Result<T, JaTextError>;

/// Format a calendar date given as numbers, rejecting impossible dates
///
/// # Examples
/// ```
/// assert_eq!(ja_text::try_format_wareki(2025, 9, 2).unwrap(), "令和7年9月2日");
/// assert!(ja_text::try_format_wareki(2025, 2, 30).is_err());
/// ```
pub fn try_format_wareki(year: i32, month: u32, day: u32) -> Result<String> {
    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .map(format_wareki)
        .ok_or_else(|| JaTextError::InvalidDate(format!("{year}-{month}-{day}")))
}

/// Extract the era tag from a label, failing on unrecognized labels
pub fn try_era_tag(label: &str) -> Result<String> {
    era_tag(label).ok_or_else(|| JaTextError::InvalidEraLabel(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_format_wareki() {
        assert_eq!(try_format_wareki(2025, 9, 2).unwrap(), "令和7年9月2日");
        assert!(matches!(
            try_format_wareki(2025, 13, 1),
            Err(JaTextError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_try_era_tag() {
        assert_eq!(try_era_tag("令和7年9月2日").unwrap(), "R7");
        assert!(matches!(
            try_era_tag("unknown"),
            Err(JaTextError::InvalidEraLabel(_))
        ));
    }
}
