//! Report input types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ReportError;

/// Organizational unit submitting the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "学年委員1年")]
    Grade1,
    #[serde(rename = "学年委員2年")]
    Grade2,
    #[serde(rename = "学年委員3年")]
    Grade3,
    #[serde(rename = "学年委員4年")]
    Grade4,
    #[serde(rename = "学年委員5年")]
    Grade5,
    #[serde(rename = "学年委員6年")]
    Grade6,
    #[serde(rename = "学年委員あゆみ")]
    Ayumi,
    #[serde(rename = "広報部")]
    PublicRelations,
    #[serde(rename = "校外安全指導部")]
    OffCampusSafety,
    #[serde(rename = "教養部")]
    Culture,
    #[serde(rename = "環境厚生部")]
    Welfare,
    #[serde(rename = "選考委員会")]
    Nominating,
    #[serde(rename = "育成会本部")]
    Headquarters,
}

impl Department {
    /// Every department, in form order
    pub const ALL: [Department; 13] = [
        Department::Grade1,
        Department::Grade2,
        Department::Grade3,
        Department::Grade4,
        Department::Grade5,
        Department::Grade6,
        Department::Ayumi,
        Department::PublicRelations,
        Department::OffCampusSafety,
        Department::Culture,
        Department::Welfare,
        Department::Nominating,
        Department::Headquarters,
    ];

    /// Display name, also used on the page and in file names
    pub fn name(self) -> &'static str {
        match self {
            Department::Grade1 => "学年委員1年",
            Department::Grade2 => "学年委員2年",
            Department::Grade3 => "学年委員3年",
            Department::Grade4 => "学年委員4年",
            Department::Grade5 => "学年委員5年",
            Department::Grade6 => "学年委員6年",
            Department::Ayumi => "学年委員あゆみ",
            Department::PublicRelations => "広報部",
            Department::OffCampusSafety => "校外安全指導部",
            Department::Culture => "教養部",
            Department::Welfare => "環境厚生部",
            Department::Nominating => "選考委員会",
            Department::Headquarters => "育成会本部",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Department {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|dept| dept.name() == s.trim())
            .ok_or_else(|| ReportError::UnknownDepartment(s.to_string()))
    }
}

/// One date/text pair in a repeatable section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Free-form date text as typed (e.g., "4/1")
    #[serde(default)]
    pub date: String,
    /// Entry text, may span several lines
    #[serde(default)]
    pub content: String,
}

impl Entry {
    pub fn new(date: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            content: content.into(),
        }
    }

    /// Both fields are empty
    pub fn is_blank(&self) -> bool {
        self.date.trim().is_empty() && self.content.trim().is_empty()
    }

    /// Both fields are filled in
    pub fn is_complete(&self) -> bool {
        !self.date.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Exactly one field is filled in
    pub fn is_partial(&self) -> bool {
        !self.is_blank() && !self.is_complete()
    }
}

/// Repeatable table sections of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    BusinessReport,
    NextActivities,
}

impl Section {
    /// Numbered section title drawn above the table
    pub fn title(self) -> &'static str {
        match self {
            Section::BusinessReport => "1. 事業内容報告",
            Section::NextActivities => "3. 次回運営委員会までの活動予定",
        }
    }

    /// Header label of the content column
    pub fn content_label(self) -> &'static str {
        match self {
            Section::BusinessReport => "事業内容",
            Section::NextActivities => "活動予定",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::BusinessReport => f.write_str("事業内容報告"),
            Section::NextActivities => f.write_str("次回活動予定"),
        }
    }
}

/// Validated form values for one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    /// Date the report is written
    pub report_date: NaiveDate,
    /// Submitting department
    pub department: Department,
    /// Activities carried out
    pub business_entries: Vec<Entry>,
    /// Reflections and issues (free text)
    pub issues: String,
    /// Activities planned before the next committee meeting
    pub next_activity_entries: Vec<Entry>,
}

impl ReportInput {
    /// Parse report input from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Entries of a table section
    pub fn entries(&self, section: Section) -> &[Entry] {
        match section {
            Section::BusinessReport => &self.business_entries,
            Section::NextActivities => &self.next_activity_entries,
        }
    }
}
