//! Report rendering

use pdf_core::{calculate_x_offset, Align, Color, FontData, PdfDocument};
use tracing::{debug, warn};

use crate::config::{MeasureMode, PageGeometry};
use crate::estimator::{AverageAdvanceMeasurer, FontMetricsMeasurer, TextHeightEstimator, TextMeasurer};
use crate::layout::{compose, Layout, LayoutBlock};
use crate::naming::report_file_name;
use crate::schema::ReportInput;
use crate::Result;

/// Name the report font is registered under in the document
const FONT_NAME: &str = "report";

/// A finished report
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// PDF file bytes
    pub bytes: Vec<u8>,
    /// Suggested download name
    pub file_name: String,
    /// Layout the page was drawn from
    pub layout: Layout,
}

/// Renders report input to a single-page PDF
pub struct ReportRenderer {
    font: FontData,
    geometry: PageGeometry,
}

impl ReportRenderer {
    /// Create a renderer with the default A4 geometry
    ///
    /// # Arguments
    /// * `font_bytes` - TrueType font with Japanese glyphs
    pub fn new(font_bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            font: FontData::from_ttf(FONT_NAME, font_bytes)?,
            geometry: PageGeometry::default(),
        })
    }

    /// Replace the page geometry
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Result<Self> {
        self.set_geometry(geometry)?;
        Ok(self)
    }

    /// Replace the page geometry, rejecting invalid values
    pub fn set_geometry(&mut self, geometry: PageGeometry) -> Result<()> {
        geometry.validate()?;
        self.geometry = geometry;
        Ok(())
    }

    pub fn set_measure_mode(&mut self, mode: MeasureMode) {
        self.geometry.measure_mode = mode;
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn font(&self) -> &FontData {
        &self.font
    }

    /// Validate the input and compose its page
    pub fn layout(&self, input: &ReportInput) -> Result<Layout> {
        input.validate()?;

        let font_size = self.geometry.font_size as f32;
        let average;
        let metrics;
        let measurer: &dyn TextMeasurer = match self.geometry.measure_mode {
            MeasureMode::Average => {
                average = AverageAdvanceMeasurer::from_font(&self.font, font_size);
                &average
            }
            MeasureMode::FontMetrics => {
                metrics = FontMetricsMeasurer::new(&self.font, font_size);
                &metrics
            }
        };
        let estimator = TextHeightEstimator::new(measurer, self.geometry.line_height());

        Ok(compose(input, &self.geometry, &estimator))
    }

    /// Render the report to PDF bytes
    ///
    /// # Example
    ///
    /// ```ignore
    /// let renderer = ReportRenderer::new(&std::fs::read("ipaexg.ttf")?)?;
    /// let report = renderer.render(&input)?;
    /// std::fs::write(&report.file_name, &report.bytes)?;
    /// ```
    pub fn render(&self, input: &ReportInput) -> Result<RenderedReport> {
        let layout = self.layout(input)?;

        if let Some(excess) = layout.overflow() {
            warn!(
                excess,
                final_cursor = layout.final_cursor,
                bottom_limit = layout.bottom_limit,
                "report content runs past the bottom margin"
            );
        }

        let mut doc = PdfDocument::new(self.geometry.page_width, self.geometry.page_height)?;
        doc.add_font_data(self.font.clone())?;
        doc.set_font(FONT_NAME, self.geometry.font_size as f32)?;
        doc.set_text_color(Color::black());
        doc.set_stroke(Color::black(), self.geometry.border_width);

        let ascent = self.font.ascender() as f64 / self.font.units_per_em() as f64;
        for block in &layout.blocks {
            draw_block(&mut doc, block, ascent)?;
        }

        let bytes = doc.to_bytes()?;
        let file_name = report_file_name(input.report_date, input.department);
        debug!(file_name = %file_name, size = bytes.len(), "rendered report");

        Ok(RenderedReport {
            bytes,
            file_name,
            layout,
        })
    }
}

/// Draw one block on page 1: border first, then its lines
fn draw_block(doc: &mut PdfDocument, block: &LayoutBlock, ascent: f64) -> Result<()> {
    if block.bordered {
        doc.draw_rect(1, block.x, block.y, block.width, block.height)?;
    }

    doc.set_font_size(block.font_size as f32)?;
    let half_leading = (block.line_height - block.font_size) / 2.0;

    for (index, line) in block.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let width = doc.get_text_width(line)?;
        let x = block.x + block.inset + calculate_x_offset(width, block.text_width(), block.align);
        let baseline = block.line_top(index) + half_leading + block.font_size * ascent;
        doc.insert_text(line, 1, x, baseline, Align::Left)?;
    }

    Ok(())
}
