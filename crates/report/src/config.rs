//! Page geometry configuration

use pdf_core::{A4_HEIGHT, A4_WIDTH};
use serde::{Deserialize, Serialize};

use crate::{ReportError, Result};

/// Text measurement strategy used when wrapping block text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasureMode {
    /// Average advance of one representative glyph
    #[default]
    Average,
    /// Exact glyph advances with kinsoku line breaking
    FontMetrics,
}

/// Fixed page geometry and typography, in points
///
/// Missing keys in JSON fall back to the A4 defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Content below `page_height - margin_bottom` counts as overflow
    pub margin_bottom: f64,
    /// Height of a table's two-column header row
    pub header_row_height: f64,
    /// Minimum height of a table data row
    pub content_row_min_height: f64,
    /// Minimum height of the issues box, in lines
    pub issues_min_lines: u32,
    /// Vertical gap between sections
    pub section_margin: f64,
    /// Vertical gap between the page header and the first section
    pub header_margin: f64,
    /// Height of a single-line section title band
    pub section_title_height: f64,
    /// Padding between a box border and its text
    pub text_inset: f64,
    pub font_size: f64,
    pub title_font_size: f64,
    /// Line height as a multiple of the font size
    pub line_spacing: f64,
    /// Date column width as a fraction of the content width
    pub date_column_ratio: f64,
    /// Stroke width of box borders
    pub border_width: f64,
    pub measure_mode: MeasureMode,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin_left: 50.0,
            margin_right: 50.0,
            margin_bottom: 40.0,
            header_row_height: 20.0,
            content_row_min_height: 20.0,
            issues_min_lines: 5,
            section_margin: 20.0,
            header_margin: 20.0,
            section_title_height: 18.0,
            text_inset: 2.0,
            font_size: 10.0,
            title_font_size: 14.0,
            line_spacing: 1.2,
            date_column_ratio: 0.2,
            border_width: 0.5,
            measure_mode: MeasureMode::Average,
        }
    }
}

impl PageGeometry {
    /// Parse geometry from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let geometry: PageGeometry = serde_json::from_str(json)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Horizontal span between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Right edge of the content area
    pub fn content_right(&self) -> f64 {
        self.margin_left + self.content_width()
    }

    /// Height of one line of body text
    pub fn line_height(&self) -> f64 {
        self.font_size * self.line_spacing
    }

    /// Minimum height of the issues box
    pub fn issues_min_height(&self) -> f64 {
        self.issues_min_lines as f64 * self.line_height()
    }

    /// Width of the date column
    pub fn date_column_width(&self) -> f64 {
        self.content_width() * self.date_column_ratio
    }

    /// Width of the content column
    pub fn content_column_width(&self) -> f64 {
        self.content_width() - self.date_column_width()
    }

    /// Lowest y a block may reach before the page overflows
    pub fn bottom_limit(&self) -> f64 {
        self.page_height - self.margin_bottom
    }

    /// Check that the geometry can lay out a page
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(ReportError::InvalidGeometry(msg.to_string()));

        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return invalid("page size must be positive");
        }
        if self.margin_left < 0.0 || self.margin_right < 0.0 || self.margin_bottom < 0.0 {
            return invalid("margins must not be negative");
        }
        if self.content_width() <= 0.0 {
            return invalid("margins leave no content width");
        }
        if !(self.font_size > 0.0 && self.title_font_size > 0.0) {
            return invalid("font sizes must be positive");
        }
        if self.line_spacing < 1.0 {
            return invalid("line spacing must be at least 1.0");
        }
        if !(self.date_column_ratio > 0.0 && self.date_column_ratio < 1.0) {
            return invalid("date column ratio must be between 0 and 1");
        }
        if self.text_inset < 0.0 {
            return invalid("text inset must not be negative");
        }
        if self.content_column_width() <= 2.0 * self.text_inset {
            return invalid("text inset leaves no room for content");
        }
        if self.date_column_width() <= 2.0 * self.text_inset {
            return invalid("text inset leaves no room for the date");
        }
        if !(self.header_row_height > 0.0 && self.content_row_min_height > 0.0) {
            return invalid("row heights must be positive");
        }
        if !(self.section_margin >= 0.0
            && self.header_margin >= 0.0
            && self.section_title_height >= 0.0)
        {
            return invalid("margins and title height must not be negative");
        }
        if self.border_width < 0.0 {
            return invalid("border width must not be negative");
        }
        if self.issues_min_lines == 0 {
            return invalid("issues box needs at least one line");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_valid_a4() {
        let geometry = PageGeometry::default();
        geometry.validate().unwrap();

        assert!((geometry.content_width() - 495.28).abs() < 1e-9);
        assert!((geometry.line_height() - 12.0).abs() < 1e-9);
        assert!((geometry.issues_min_height() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_column_split() {
        let geometry = PageGeometry {
            page_width: 600.0,
            margin_left: 50.0,
            margin_right: 50.0,
            ..PageGeometry::default()
        };

        assert_eq!(geometry.date_column_width(), 100.0);
        assert_eq!(geometry.content_column_width(), 400.0);
        assert_eq!(geometry.content_right(), 550.0);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let geometry = PageGeometry::from_json(r#"{ "fontSize": 12, "marginLeft": 40 }"#).unwrap();

        assert_eq!(geometry.font_size, 12.0);
        assert_eq!(geometry.margin_left, 40.0);
        assert_eq!(geometry.margin_right, 50.0);
        assert_eq!(geometry.measure_mode, MeasureMode::Average);
    }

    #[test]
    fn test_from_json_measure_mode() {
        let geometry = PageGeometry::from_json(r#"{ "measureMode": "fontMetrics" }"#).unwrap();
        assert_eq!(geometry.measure_mode, MeasureMode::FontMetrics);
    }

    #[test]
    fn test_rejects_margins_wider_than_page() {
        let result = PageGeometry::from_json(r#"{ "pageWidth": 90, "marginLeft": 50 }"#);
        assert!(matches!(result, Err(ReportError::InvalidGeometry(_))));
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let geometry = PageGeometry {
            date_column_ratio: 1.0,
            ..PageGeometry::default()
        };
        assert!(matches!(
            geometry.validate(),
            Err(ReportError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_rejects_date_column_narrower_than_inset() {
        let result = PageGeometry::from_json(r#"{ "dateColumnRatio": 0.005 }"#);
        assert!(matches!(result, Err(ReportError::InvalidGeometry(_))));
    }

    #[test]
    fn test_rejects_negative_spacing() {
        for json in [
            r#"{ "sectionMargin": -30 }"#,
            r#"{ "headerMargin": -1 }"#,
            r#"{ "sectionTitleHeight": -18 }"#,
            r#"{ "borderWidth": -0.5 }"#,
            r#"{ "textInset": -2 }"#,
        ] {
            assert!(
                matches!(
                    PageGeometry::from_json(json),
                    Err(ReportError::InvalidGeometry(_))
                ),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn test_accepts_zero_spacing() {
        let geometry = PageGeometry {
            section_margin: 0.0,
            header_margin: 0.0,
            border_width: 0.0,
            text_inset: 0.0,
            ..PageGeometry::default()
        };
        geometry.validate().unwrap();
    }

    #[test]
    fn test_rejects_zero_font_size() {
        let geometry = PageGeometry {
            font_size: 0.0,
            ..PageGeometry::default()
        };
        assert!(geometry.validate().is_err());
    }
}
