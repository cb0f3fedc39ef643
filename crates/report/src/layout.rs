//! Layout composer
//!
//! Turns a [`ReportInput`] into positioned, sized blocks on a single page.
//! Coordinates are in points with the origin at the top-left corner and y
//! growing downward; the renderer flips them when drawing.
//!
//! The page is built in one forward pass:
//!
//! ```text
//! header (notice, title, date, department)
//! 1. 事業内容報告        title band, header row, one row per entry
//! 2. 活動の反省と課題    two-line title band, issues box
//! 3. 次回運営委員会...   title band, header row, one row per entry
//! ```

use pdf_core::Align;
use tracing::debug;

use crate::config::PageGeometry;
use crate::estimator::{TextEstimate, TextHeightEstimator};
use crate::schema::{Entry, ReportInput, Section};

/// Submission notice printed above the title
pub const SUBMISSION_NOTICE: &str = "***運営委員会にて提出をお願いします***";
/// Document title
pub const DOCUMENT_TITLE: &str = "事業内容報告書";
/// Issues section title
pub const ISSUES_TITLE: &str = "2. 活動の反省と課題";
/// Second line of the issues title band
pub const ISSUES_NOTE: &str = "（次年度以降の改善材料になりますので詳細にお願いします）";
/// Header label of the date column
pub const DATE_LABEL: &str = "日程";

const NOTICE_TOP: f64 = 50.0;
const TITLE_TOP: f64 = 78.0;
const DATE_TOP: f64 = 110.0;
const DEPARTMENT_TOP: f64 = 124.0;
const HEADER_BOTTOM: f64 = 140.0;

/// What a block represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Free-standing page header text
    Text,
    /// Numbered section title band
    SectionTitle,
    /// Table column label
    HeaderCell,
    /// Date column of a table row
    DateCell,
    /// Content column of a table row
    ContentCell,
    /// Bordered issues text box
    IssuesBox,
}

/// Vertical placement of a block's lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VAlign {
    /// Lines start at the top inset
    #[default]
    Top,
    /// Lines are centered in the block height
    Center,
}

/// One positioned, sized unit of the page
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBlock {
    pub kind: BlockKind,
    /// Table or section the block belongs to, if any
    pub section: Option<Section>,
    pub x: f64,
    /// Top edge, measured from the top of the page
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Wrapped display lines
    pub lines: Vec<String>,
    pub align: Align,
    pub valign: VAlign,
    pub font_size: f64,
    pub line_height: f64,
    /// Draw the block outline
    pub bordered: bool,
    /// Padding between the border and the text
    pub inset: f64,
}

impl LayoutBlock {
    /// Bottom edge, measured from the top of the page
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Top of the `index`-th line box
    ///
    /// Centered blocks use `(height - lines * line_height) / 2` as the top
    /// offset, which for a single line is `(height - line_height) / 2`.
    pub fn line_top(&self, index: usize) -> f64 {
        let first = match self.valign {
            VAlign::Top => self.y + self.inset,
            VAlign::Center => {
                let text_height = self.lines.len() as f64 * self.line_height;
                self.y + ((self.height - text_height) / 2.0).max(0.0)
            }
        };
        first + index as f64 * self.line_height
    }

    /// Horizontal span available to text
    pub fn text_width(&self) -> f64 {
        self.width - 2.0 * self.inset
    }
}

/// Current vertical offset while composing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursor(f64);

impl Cursor {
    pub fn at(y: f64) -> Self {
        Cursor(y)
    }

    pub fn y(self) -> f64 {
        self.0
    }

    /// Move down by `by` points
    pub fn advance(&mut self, by: f64) {
        debug_assert!(by >= 0.0, "cursor only moves down");
        self.0 += by;
    }
}

/// Composed page
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Blocks in placement order
    pub blocks: Vec<LayoutBlock>,
    /// Cursor position after the last block
    pub final_cursor: f64,
    pub page_height: f64,
    /// Lowest y content may reach
    pub bottom_limit: f64,
}

impl Layout {
    /// How far content runs past the bottom margin, if it does
    pub fn overflow(&self) -> Option<f64> {
        let excess = self.final_cursor - self.bottom_limit;
        (excess > 0.0).then_some(excess)
    }

    /// Blocks of one kind, in placement order
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &LayoutBlock> {
        self.blocks.iter().filter(move |block| block.kind == kind)
    }

    /// Blocks of one kind within a section
    pub fn section_blocks(
        &self,
        section: Section,
        kind: BlockKind,
    ) -> impl Iterator<Item = &LayoutBlock> {
        self.blocks
            .iter()
            .filter(move |block| block.kind == kind && block.section == Some(section))
    }

    /// The issues box
    pub fn issues_box(&self) -> Option<&LayoutBlock> {
        self.blocks_of(BlockKind::IssuesBox).next()
    }
}

/// Lay out one report page
///
/// Every entry produces a row, in input order. An empty entry list yields
/// one blank minimum-height row under the header.
///
/// # Panics
/// Panics if `geometry` fails [`PageGeometry::validate`].
///
/// # Example
///
/// ```ignore
/// let measurer = AverageAdvanceMeasurer::full_width(geometry.font_size);
/// let estimator = TextHeightEstimator::new(&measurer, geometry.line_height());
/// let layout = compose(&input, &geometry, &estimator);
/// ```
pub fn compose(
    input: &ReportInput,
    geometry: &PageGeometry,
    estimator: &TextHeightEstimator<'_>,
) -> Layout {
    if let Err(e) = geometry.validate() {
        panic!("cannot compose with invalid geometry: {e}");
    }

    let mut composer = Composer {
        geometry,
        estimator,
        cursor: Cursor::default(),
        blocks: Vec::new(),
    };

    composer.place_header(input);
    composer.place_table(Section::BusinessReport, input.entries(Section::BusinessReport));
    composer.cursor.advance(geometry.section_margin);
    composer.place_issues(&input.issues);
    composer.cursor.advance(geometry.section_margin);
    composer.place_table(Section::NextActivities, input.entries(Section::NextActivities));

    debug!(
        blocks = composer.blocks.len(),
        final_cursor = composer.cursor.y(),
        "composed report layout"
    );

    Layout {
        blocks: composer.blocks,
        final_cursor: composer.cursor.y(),
        page_height: geometry.page_height,
        bottom_limit: geometry.bottom_limit(),
    }
}

struct Composer<'a> {
    geometry: &'a PageGeometry,
    estimator: &'a TextHeightEstimator<'a>,
    cursor: Cursor,
    blocks: Vec<LayoutBlock>,
}

impl Composer<'_> {
    fn text_block(&self, y: f64, text: &str, font_size: f64, align: Align) -> LayoutBlock {
        let g = self.geometry;
        LayoutBlock {
            kind: BlockKind::Text,
            section: None,
            x: g.margin_left,
            y,
            width: g.content_width(),
            height: font_size * g.line_spacing,
            lines: vec![text.to_string()],
            align,
            valign: VAlign::Center,
            font_size,
            line_height: font_size * g.line_spacing,
            bordered: false,
            inset: 0.0,
        }
    }

    fn cell(
        &self,
        kind: BlockKind,
        section: Section,
        x: f64,
        width: f64,
        height: f64,
        lines: Vec<String>,
    ) -> LayoutBlock {
        let (align, valign) = match kind {
            BlockKind::ContentCell => (Align::Left, VAlign::Top),
            _ => (Align::Center, VAlign::Center),
        };
        LayoutBlock {
            kind,
            section: Some(section),
            x,
            y: self.cursor.y(),
            width,
            height,
            lines,
            align,
            valign,
            font_size: self.geometry.font_size,
            line_height: self.estimator.line_height(),
            bordered: true,
            inset: self.geometry.text_inset,
        }
    }

    /// Height of a bordered box holding `estimate`, with the inset above and
    /// below the text
    fn boxed_height(&self, estimate: &TextEstimate) -> f64 {
        let text = estimate.lines.len() as f64 * self.estimator.line_height();
        estimate.height.max(text + 2.0 * self.geometry.text_inset)
    }

    fn place_header(&mut self, input: &ReportInput) {
        let g = self.geometry;
        let date_label = ja_text::format_wareki(input.report_date);

        let header = [
            self.text_block(NOTICE_TOP, SUBMISSION_NOTICE, g.font_size, Align::Left),
            self.text_block(TITLE_TOP, DOCUMENT_TITLE, g.title_font_size, Align::Center),
            self.text_block(DATE_TOP, &date_label, g.font_size, Align::Right),
            self.text_block(DEPARTMENT_TOP, input.department.name(), g.font_size, Align::Right),
        ];
        self.blocks.extend(header);

        self.cursor = Cursor::at(HEADER_BOTTOM);
        self.cursor.advance(g.header_margin);
    }

    fn place_title(&mut self, section: Option<Section>, lines: Vec<String>) {
        let g = self.geometry;
        let height = g
            .section_title_height
            .max(lines.len() as f64 * g.line_height());

        self.blocks.push(LayoutBlock {
            kind: BlockKind::SectionTitle,
            section,
            x: g.margin_left,
            y: self.cursor.y(),
            width: g.content_width(),
            height,
            lines,
            align: Align::Left,
            valign: VAlign::Center,
            font_size: g.font_size,
            line_height: g.line_height(),
            bordered: false,
            inset: 0.0,
        });
        self.cursor.advance(height);
    }

    fn place_table(&mut self, section: Section, entries: &[Entry]) {
        let g = self.geometry;
        let date_x = g.margin_left;
        let content_x = g.margin_left + g.date_column_width();
        let date_width = g.date_column_width();
        let content_width = g.content_column_width();

        self.place_title(Some(section), vec![section.title().to_string()]);

        let labels = [
            (date_x, date_width, DATE_LABEL),
            (content_x, content_width, section.content_label()),
        ];
        for (x, width, label) in labels {
            let cell = self.cell(
                BlockKind::HeaderCell,
                section,
                x,
                width,
                g.header_row_height,
                vec![label.to_string()],
            );
            self.blocks.push(cell);
        }
        self.cursor.advance(g.header_row_height);

        let placeholder = [Entry::default()];
        let rows = if entries.is_empty() { &placeholder[..] } else { entries };

        for entry in rows {
            let inner_content = content_width - 2.0 * g.text_inset;
            let inner_date = date_width - 2.0 * g.text_inset;
            let content = self
                .estimator
                .estimate(&entry.content, inner_content, g.content_row_min_height);
            let date = self
                .estimator
                .estimate(&entry.date, inner_date, g.content_row_min_height);
            let height = self
                .boxed_height(&content)
                .max(self.boxed_height(&date));

            let date_cell = self.cell(BlockKind::DateCell, section, date_x, date_width, height, date.lines);
            let content_cell = self.cell(
                BlockKind::ContentCell,
                section,
                content_x,
                content_width,
                height,
                content.lines,
            );
            self.blocks.push(date_cell);
            self.blocks.push(content_cell);
            self.cursor.advance(height);
        }

        debug!(
            section = %section,
            rows = rows.len(),
            cursor = self.cursor.y(),
            "placed table"
        );
    }

    fn place_issues(&mut self, issues: &str) {
        let g = self.geometry;

        self.place_title(None, vec![ISSUES_TITLE.to_string(), ISSUES_NOTE.to_string()]);

        let estimate = self.estimator.estimate(
            issues,
            g.content_width() - 2.0 * g.text_inset,
            g.issues_min_height(),
        );

        let height = self.boxed_height(&estimate);

        self.blocks.push(LayoutBlock {
            kind: BlockKind::IssuesBox,
            section: None,
            x: g.margin_left,
            y: self.cursor.y(),
            width: g.content_width(),
            height,
            lines: estimate.lines,
            align: Align::Left,
            valign: VAlign::Top,
            font_size: g.font_size,
            line_height: self.estimator.line_height(),
            bordered: true,
            inset: g.text_inset,
        });
        self.cursor.advance(height);

        debug!(height, cursor = self.cursor.y(), "placed issues box");
    }
}
