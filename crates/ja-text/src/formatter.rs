//! Japanese era (和暦) date formatting

use crate::digits::to_ascii_digits;
use chrono::{Datelike, NaiveDate};

/// Japanese calendar era
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    /// 令和, from 2019
    Reiwa,
    /// 平成, 1989 to 2018
    Heisei,
    /// 西暦 fallback for years outside the supported eras
    Seireki,
}

impl Era {
    /// Eras checked newest first
    const ORDERED: [Era; 2] = [Era::Reiwa, Era::Heisei];

    /// Gregorian year in which the era starts (its year 1)
    pub fn epoch_year(self) -> Option<i32> {
        match self {
            Era::Reiwa => Some(2019),
            Era::Heisei => Some(1989),
            Era::Seireki => None,
        }
    }

    /// Display name used in labels (e.g., "令和")
    pub fn name(self) -> &'static str {
        match self {
            Era::Reiwa => "令和",
            Era::Heisei => "平成",
            Era::Seireki => "西暦",
        }
    }

    /// ASCII initial used in file identifiers (e.g., "R")
    ///
    /// The Gregorian fallback has no initial; its tag is the bare year.
    pub fn initial(self) -> Option<char> {
        match self {
            Era::Reiwa => Some('R'),
            Era::Heisei => Some('H'),
            Era::Seireki => None,
        }
    }

    /// Resolve an era from its display name
    pub fn from_name(name: &str) -> Option<Era> {
        [Era::Reiwa, Era::Heisei, Era::Seireki]
            .into_iter()
            .find(|era| era.name() == name)
    }
}

/// Find the era for a Gregorian year and the year number within it
///
/// # Examples
/// ```
/// use ja_text::{era_of, Era};
/// assert_eq!(era_of(2025), (Era::Reiwa, 7));
/// assert_eq!(era_of(2000), (Era::Heisei, 12));
/// assert_eq!(era_of(1980), (Era::Seireki, 1980));
/// ```
pub fn era_of(year: i32) -> (Era, i32) {
    for era in Era::ORDERED {
        if let Some(epoch) = era.epoch_year() {
            if year >= epoch {
                return (era, year - epoch + 1);
            }
        }
    }
    (Era::Seireki, year)
}

/// Format a date as an era label (e.g., "令和7年9月2日")
pub fn format_wareki(date: NaiveDate) -> String {
    format_wareki_ymd(date.year(), date.month(), date.day())
}

/// Format year/month/day as an era label
///
/// # Examples
/// ```
/// use ja_text::format_wareki_ymd;
/// assert_eq!(format_wareki_ymd(2025, 9, 2), "令和7年9月2日");
/// assert_eq!(format_wareki_ymd(1980, 1, 1), "西暦1980年1月1日");
/// ```
pub fn format_wareki_ymd(year: i32, month: u32, day: u32) -> String {
    let (era, era_year) = era_of(year);
    format!("{}{}年{}月{}日", era.name(), era_year, month, day)
}

/// Extract an ASCII era tag (e.g., "R7") from an era label
///
/// Accepts any label that starts with an era name followed by the year and
/// `年`. Year digits may be written in full-width or kanji numerals.
/// Returns `None` when the label has no recognizable era prefix or year.
///
/// # Examples
/// ```
/// use ja_text::era_tag;
/// assert_eq!(era_tag("令和7年9月2日").as_deref(), Some("R7"));
/// assert_eq!(era_tag("令和７年").as_deref(), Some("R7"));
/// assert_eq!(era_tag("西暦1980年1月1日").as_deref(), Some("1980"));
/// ```
pub fn era_tag(label: &str) -> Option<String> {
    let (era_part, _) = label.split_once('年')?;

    let era = [Era::Reiwa, Era::Heisei, Era::Seireki]
        .into_iter()
        .find(|era| era_part.starts_with(era.name()))?;

    let year_part = &era_part[era.name().len()..];
    let digits = to_ascii_digits(year_part);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    match era.initial() {
        Some(initial) => Some(format!("{initial}{digits}")),
        None => Some(digits),
    }
}

/// Era tag computed straight from a date
pub fn era_tag_for_date(date: NaiveDate) -> String {
    let (era, era_year) = era_of(date.year());
    match era.initial() {
        Some(initial) => format!("{initial}{era_year}"),
        None => era_year.to_string(),
    }
}
