//! Input validation run before layout

use thiserror::Error;

use crate::schema::{ReportInput, Section};

/// A form value that cannot be laid out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{section}: at least one entry is required")]
    NoEntries { section: Section },

    #[error("{section}: entry {} needs both a date and content", .index + 1)]
    IncompleteEntry { section: Section, index: usize },

    #[error("活動の反省と課題: issues must not be empty")]
    EmptyIssues,
}

impl ReportInput {
    /// Check the input, returning the first problem in form order
    ///
    /// Entries with both fields empty are accepted and render as
    /// minimum-height rows; an entry with only one field filled is rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_section(Section::BusinessReport)?;

        if self.issues.trim().is_empty() {
            return Err(ValidationError::EmptyIssues);
        }

        self.validate_section(Section::NextActivities)
    }

    /// Collect every problem instead of stopping at the first
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let mut errors = self.section_errors(Section::BusinessReport);
        if self.issues.trim().is_empty() {
            errors.push(ValidationError::EmptyIssues);
        }
        errors.extend(self.section_errors(Section::NextActivities));
        errors
    }

    fn validate_section(&self, section: Section) -> Result<(), ValidationError> {
        match self.section_errors(section).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn section_errors(&self, section: Section) -> Vec<ValidationError> {
        let entries = self.entries(section);
        if entries.is_empty() {
            return vec![ValidationError::NoEntries { section }];
        }

        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_partial())
            .map(|(index, _)| ValidationError::IncompleteEntry { section, index })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Department, Entry};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn input() -> ReportInput {
        ReportInput {
            report_date: NaiveDate::from_ymd_opt(2025, 9, 2).unwrap(),
            department: Department::Headquarters,
            business_entries: vec![Entry::new("4/1", "入学式")],
            issues: "特になし".to_string(),
            next_activity_entries: vec![Entry::new("5/1", "総会")],
        }
    }

    #[test]
    fn test_valid_input() {
        assert_eq!(input().validate(), Ok(()));
        assert!(input().validation_errors().is_empty());
    }

    #[test]
    fn test_blank_entry_is_accepted() {
        let mut report = input();
        report.business_entries.push(Entry::default());
        assert_eq!(report.validate(), Ok(()));
    }

    #[test]
    fn test_partial_entry_rejected() {
        let mut report = input();
        report.next_activity_entries.push(Entry::new("", "反省会"));

        assert_eq!(
            report.validate(),
            Err(ValidationError::IncompleteEntry {
                section: Section::NextActivities,
                index: 1
            })
        );
    }

    #[test]
    fn test_empty_issues_rejected() {
        let mut report = input();
        report.issues = "  \n ".to_string();
        assert_eq!(report.validate(), Err(ValidationError::EmptyIssues));
    }

    #[test]
    fn test_empty_section_rejected() {
        let mut report = input();
        report.business_entries.clear();
        assert_eq!(
            report.validate(),
            Err(ValidationError::NoEntries {
                section: Section::BusinessReport
            })
        );
    }

    #[test]
    fn test_errors_reported_in_form_order() {
        let mut report = input();
        report.business_entries = vec![Entry::new("4/1", ""), Entry::new("", "x")];
        report.issues.clear();

        assert_eq!(
            report.validation_errors(),
            vec![
                ValidationError::IncompleteEntry {
                    section: Section::BusinessReport,
                    index: 0
                },
                ValidationError::IncompleteEntry {
                    section: Section::BusinessReport,
                    index: 1
                },
                ValidationError::EmptyIssues,
            ]
        );
    }

    #[test]
    fn test_error_message_is_one_based() {
        let err = ValidationError::IncompleteEntry {
            section: Section::BusinessReport,
            index: 0,
        };
        assert_eq!(err.to_string(), "事業内容報告: entry 1 needs both a date and content");
    }
}
