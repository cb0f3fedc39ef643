//! Text-height estimation
//!
//! A [`TextMeasurer`] decides how text wraps at a given width; the
//! [`TextHeightEstimator`] turns the resulting line count into a box height
//! that never drops below the caller's minimum.

use pdf_core::FontData;

/// Strategy for wrapping text into display lines
pub trait TextMeasurer {
    /// Split `text` into the lines it occupies at `available_width`
    ///
    /// Always returns at least one line; empty text yields one empty line.
    fn wrap(&self, text: &str, available_width: f64) -> Vec<String>;

    /// Number of lines `text` occupies at `available_width`
    fn line_count(&self, text: &str, available_width: f64) -> usize {
        self.wrap(text, available_width).len().max(1)
    }
}

/// Estimates wrapping from a single average character advance
///
/// Adequate for Japanese text set in a full-width font. Mixed half-width
/// text is over-estimated, which only makes boxes taller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageAdvanceMeasurer {
    advance: f64,
}

impl AverageAdvanceMeasurer {
    /// Measurer with an explicit advance width in points
    ///
    /// # Panics
    /// Panics if `advance` is not positive.
    pub fn new(advance: f64) -> Self {
        assert!(advance > 0.0, "character advance must be positive, got {advance}");
        Self { advance }
    }

    /// Full-width advance (one em) at the given font size
    pub fn full_width(font_size: f64) -> Self {
        Self::new(font_size)
    }

    /// Advance sampled from the font's representative glyph
    pub fn from_font(font: &FontData, font_size: f32) -> Self {
        Self::new(font.average_advance_points(font_size) as f64)
    }

    pub fn advance(&self) -> f64 {
        self.advance
    }

    /// Characters that fit on one line, never less than one
    pub fn chars_per_line(&self, available_width: f64) -> usize {
        assert!(
            available_width > 0.0,
            "available width must be positive, got {available_width}"
        );
        ((available_width / self.advance).floor() as usize).max(1)
    }
}

impl TextMeasurer for AverageAdvanceMeasurer {
    fn wrap(&self, text: &str, available_width: f64) -> Vec<String> {
        let per_line = self.chars_per_line(available_width);

        text.split('\n')
            .flat_map(|paragraph| {
                let chars: Vec<char> = paragraph.trim_end_matches('\r').chars().collect();
                if chars.is_empty() {
                    return vec![String::new()];
                }
                chars
                    .chunks(per_line)
                    .map(|chunk| chunk.iter().collect())
                    .collect()
            })
            .collect()
    }

    fn line_count(&self, text: &str, available_width: f64) -> usize {
        let per_line = self.chars_per_line(available_width);

        text.split('\n')
            .map(|paragraph| {
                let count = paragraph.trim_end_matches('\r').chars().count();
                count.div_ceil(per_line).max(1)
            })
            .sum()
    }
}

/// Wraps with exact glyph advances and Japanese line-breaking rules
pub struct FontMetricsMeasurer<'a> {
    font: &'a FontData,
    font_size: f32,
}

impl<'a> FontMetricsMeasurer<'a> {
    pub fn new(font: &'a FontData, font_size: f32) -> Self {
        Self { font, font_size }
    }
}

impl TextMeasurer for FontMetricsMeasurer<'_> {
    fn wrap(&self, text: &str, available_width: f64) -> Vec<String> {
        assert!(
            available_width > 0.0,
            "available width must be positive, got {available_width}"
        );
        ja_text::wrap_by_width(text, available_width, |c| {
            self.font.char_width_points(c, self.font_size) as f64
        })
    }
}

/// Wrapped lines and the box height they need
#[derive(Debug, Clone, PartialEq)]
pub struct TextEstimate {
    pub lines: Vec<String>,
    pub height: f64,
}

/// Converts wrapped line counts into box heights
pub struct TextHeightEstimator<'a> {
    measurer: &'a dyn TextMeasurer,
    line_height: f64,
}

impl<'a> TextHeightEstimator<'a> {
    /// # Panics
    /// Panics if `line_height` is not positive.
    pub fn new(measurer: &'a dyn TextMeasurer, line_height: f64) -> Self {
        assert!(line_height > 0.0, "line height must be positive, got {line_height}");
        Self {
            measurer,
            line_height,
        }
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    /// Height needed for `text`: `max(minimum, lines * line_height)`
    pub fn required_height(&self, text: &str, available_width: f64, minimum: f64) -> f64 {
        let lines = self.measurer.line_count(text, available_width);
        minimum.max(lines as f64 * self.line_height)
    }

    /// Wrap `text` and compute its box height in one pass
    pub fn estimate(&self, text: &str, available_width: f64, minimum: f64) -> TextEstimate {
        let mut lines = self.measurer.wrap(text, available_width);
        if lines.is_empty() {
            lines.push(String::new());
        }
        let height = minimum.max(lines.len() as f64 * self.line_height);
        TextEstimate { lines, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chars_per_line() {
        let measurer = AverageAdvanceMeasurer::new(10.0);
        assert_eq!(measurer.chars_per_line(100.0), 10);
        assert_eq!(measurer.chars_per_line(105.0), 10);
        assert_eq!(measurer.chars_per_line(5.0), 1);
    }

    #[test]
    fn test_empty_text_is_one_line() {
        let measurer = AverageAdvanceMeasurer::new(10.0);
        assert_eq!(measurer.line_count("", 100.0), 1);
        assert_eq!(measurer.wrap("", 100.0), vec![""]);
    }

    #[test]
    fn test_short_text_is_one_line() {
        let measurer = AverageAdvanceMeasurer::new(10.0);
        assert_eq!(measurer.line_count("入学式", 100.0), 1);
    }

    #[test]
    fn test_line_count_is_ceiling() {
        let measurer = AverageAdvanceMeasurer::new(10.0);
        let text = "あ".repeat(21);
        assert_eq!(measurer.line_count(&text, 100.0), 3);
        assert_eq!(measurer.wrap(&text, 100.0).len(), 3);
    }

    #[test]
    fn test_explicit_line_breaks() {
        let measurer = AverageAdvanceMeasurer::new(10.0);
        assert_eq!(measurer.line_count("総会\n\n反省会", 100.0), 3);
        assert_eq!(
            measurer.wrap("総会\r\n反省会", 100.0),
            vec!["総会", "反省会"]
        );
    }

    #[test]
    fn test_wrap_matches_line_count() {
        let measurer = AverageAdvanceMeasurer::new(7.5);
        for text in ["", "あ", "あいうえおかきくけこさしすせそ", "a\nbb\n\nccc", "入学式\n"] {
            assert_eq!(
                measurer.wrap(text, 30.0).len(),
                measurer.line_count(text, 30.0),
                "text {text:?}"
            );
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_advance_panics() {
        AverageAdvanceMeasurer::new(0.0);
    }

    #[test]
    fn test_required_height_respects_minimum() {
        let measurer = AverageAdvanceMeasurer::new(10.0);
        let estimator = TextHeightEstimator::new(&measurer, 12.0);

        assert_eq!(estimator.required_height("", 100.0, 20.0), 20.0);
        assert_eq!(estimator.required_height("総会", 100.0, 20.0), 20.0);
        assert_eq!(estimator.required_height(&"あ".repeat(25), 100.0, 20.0), 36.0);
    }

    #[test]
    fn test_required_height_monotonic() {
        let measurer = AverageAdvanceMeasurer::new(10.0);
        let estimator = TextHeightEstimator::new(&measurer, 12.0);

        let mut previous = 0.0;
        let mut text = String::new();
        for _ in 0..200 {
            text.push('字');
            let height = estimator.required_height(&text, 95.0, 20.0);
            assert!(height >= previous);
            assert!(height >= 20.0);
            previous = height;
        }
    }

    #[test]
    fn test_estimate_returns_lines_and_height() {
        let measurer = AverageAdvanceMeasurer::new(10.0);
        let estimator = TextHeightEstimator::new(&measurer, 12.0);

        let estimate = estimator.estimate("あいうえおかき", 50.0, 20.0);
        assert_eq!(estimate.lines, vec!["あいうえお", "かき"]);
        assert_eq!(estimate.height, 24.0);
    }
}
