//! Output file naming

use chrono::{Datelike, NaiveDate};

use crate::schema::Department;

/// Fixed document name between the date tag and the department
pub const DOCUMENT_NAME: &str = "育成会事業報告書";

/// File name for a report: era tag, two-digit month, document name, department
///
/// # Example
///
/// ```ignore
/// let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
/// assert_eq!(
///     report_file_name(date, Department::Headquarters),
///     "R7.09育成会事業報告書_育成会本部.pdf"
/// );
/// ```
pub fn report_file_name(date: NaiveDate, department: Department) -> String {
    let label = ja_text::format_wareki(date);
    let tag = ja_text::era_tag(&label).unwrap_or_else(|| ja_text::era_tag_for_date(date));

    format!(
        "{tag}.{:02}{DOCUMENT_NAME}_{}.pdf",
        date.month(),
        department.name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reiwa_file_name() {
        assert_eq!(
            report_file_name(date(2025, 9, 2), Department::Headquarters),
            "R7.09育成会事業報告書_育成会本部.pdf"
        );
    }

    #[test]
    fn test_heisei_file_name() {
        assert_eq!(
            report_file_name(date(2000, 12, 1), Department::PublicRelations),
            "H12.12育成会事業報告書_広報部.pdf"
        );
    }

    #[test]
    fn test_first_era_year() {
        assert_eq!(
            report_file_name(date(2019, 5, 1), Department::Grade1),
            "R1.05育成会事業報告書_学年委員1年.pdf"
        );
    }

    #[test]
    fn test_fallback_uses_plain_year() {
        assert_eq!(
            report_file_name(date(1980, 1, 1), Department::Culture),
            "1980.01育成会事業報告書_教養部.pdf"
        );
    }
}
