//! Integration tests for report composition and rendering

use chrono::NaiveDate;
use lopdf::Document;
use pretty_assertions::assert_eq;
use report::{
    compose, AverageAdvanceMeasurer, BlockKind, Department, Entry, MeasureMode, PageGeometry,
    ReportError, ReportInput, ReportRenderer, Section, TextHeightEstimator, ValidationError,
};

/// Font committed under `fonts/` for rendering tests
///
/// It has no Japanese glyphs; those render as the missing glyph and measure
/// one em, which is enough to exercise layout and PDF output.
fn get_test_font_data() -> Vec<u8> {
    std::fs::read("../../fonts/DejaVuSans.ttf").expect("Failed to read test font file")
}

const SCENARIO_JSON: &str = r#"{
    "reportDate": "2025-09-02",
    "department": "育成会本部",
    "businessEntries": [{ "date": "4/1", "content": "入学式" }],
    "issues": "特になし",
    "nextActivityEntries": [{ "date": "5/1", "content": "総会" }]
}"#;

fn scenario() -> ReportInput {
    ReportInput::from_json(SCENARIO_JSON).unwrap()
}

#[test]
fn test_scenario_layout_from_json() {
    let input = scenario();
    assert_eq!(input.report_date, NaiveDate::from_ymd_opt(2025, 9, 2).unwrap());
    input.validate().unwrap();

    let geometry = PageGeometry::default();
    let measurer = AverageAdvanceMeasurer::full_width(geometry.font_size);
    let estimator = TextHeightEstimator::new(&measurer, geometry.line_height());
    let layout = compose(&input, &geometry, &estimator);

    let business: Vec<_> = layout
        .section_blocks(Section::BusinessReport, BlockKind::ContentCell)
        .collect();
    assert_eq!(business.len(), 1);
    assert_eq!(business[0].height, geometry.content_row_min_height);

    let issues = layout.issues_box().unwrap();
    assert!((issues.height - geometry.issues_min_height()).abs() < 1e-9);

    let file_name = report::report_file_name(input.report_date, input.department);
    assert!(file_name.contains("R7.09"));
    assert!(file_name.contains("育成会本部"));
}

#[test]
fn test_custom_geometry_from_json() {
    let geometry = PageGeometry::from_json(r#"{ "fontSize": 12, "issuesMinLines": 3 }"#).unwrap();
    let measurer = AverageAdvanceMeasurer::full_width(geometry.font_size);
    let estimator = TextHeightEstimator::new(&measurer, geometry.line_height());
    let layout = compose(&scenario(), &geometry, &estimator);

    let issues = layout.issues_box().unwrap();
    assert!((issues.height - 3.0 * 12.0 * 1.2).abs() < 1e-9);
}

#[test]
fn test_unknown_department_rejected() {
    let json = SCENARIO_JSON.replace("育成会本部", "総務部");
    assert!(matches!(
        ReportInput::from_json(&json),
        Err(ReportError::JsonError(_))
    ));
    assert!("総務部".parse::<Department>().is_err());
}

#[test]
fn test_render_scenario() {
    let font_data = get_test_font_data();

    let renderer = ReportRenderer::new(&font_data).unwrap();
    let report = renderer.render(&scenario()).unwrap();

    assert_eq!(report.file_name, "R7.09育成会事業報告書_育成会本部.pdf");
    assert!(report.bytes.starts_with(b"%PDF-1.7"));
    assert_eq!(report.layout.overflow(), None);

    let doc = Document::load_mem(&report.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    let page_id = *doc.get_pages().get(&1).unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    let content = String::from_utf8_lossy(&content);

    let rects = content.matches(" re\n").count();
    let bordered = report.layout.blocks.iter().filter(|b| b.bordered).count();
    assert_eq!(rects, bordered);
    assert!(content.contains(" Tj\n"));
}

#[test]
fn test_render_wrapped_text_inside_borders() {
    let renderer = ReportRenderer::new(&get_test_font_data()).unwrap();
    let mut input = scenario();
    input.business_entries = vec![Entry::new("4/1", "入学式の受付".repeat(30))];
    input.issues = "会場設営の人手が不足しました。".repeat(20);

    let report = renderer.render(&input).unwrap();
    for block in report.layout.blocks.iter().filter(|b| b.bordered) {
        let last = block.lines.len() - 1;
        assert!(
            block.line_top(last) + block.line_height <= block.bottom() + 1e-9,
            "{:?} text runs past its border",
            block.kind
        );
    }
}

#[test]
fn test_render_font_metrics_mode() {
    let font_data = get_test_font_data();

    let mut renderer = ReportRenderer::new(&font_data).unwrap();
    renderer.set_measure_mode(MeasureMode::FontMetrics);

    let mut input = scenario();
    input.business_entries = vec![Entry::new(
        "4/1",
        "入学式の受付と会場設営を行いました。保護者の皆様のご協力により、滞りなく終了しました。"
            .repeat(4),
    )];

    let report = renderer.render(&input).unwrap();
    let row = report
        .layout
        .section_blocks(Section::BusinessReport, BlockKind::ContentCell)
        .next()
        .unwrap();

    assert!(row.lines.len() > 1);
    for line in &row.lines {
        assert!(!line.starts_with('。'));
        assert!(!line.starts_with('、'));
    }
}

#[test]
fn test_render_rejects_invalid_input() {
    let font_data = get_test_font_data();

    let renderer = ReportRenderer::new(&font_data).unwrap();
    let mut input = scenario();
    input.issues = String::new();

    assert!(matches!(
        renderer.render(&input),
        Err(ReportError::Validation(ValidationError::EmptyIssues))
    ));
}

#[test]
fn test_render_overflow_still_single_page() {
    let font_data = get_test_font_data();

    let renderer = ReportRenderer::new(&font_data).unwrap();
    let mut input = scenario();
    input.issues = "反省点".repeat(2000);

    let report = renderer.render(&input).unwrap();
    assert!(report.layout.overflow().is_some());

    let doc = Document::load_mem(&report.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn test_renderer_rejects_invalid_font() {
    assert!(matches!(
        ReportRenderer::new(b"not a font"),
        Err(ReportError::PdfError(_))
    ));
}

#[test]
fn test_renderer_rejects_invalid_geometry() {
    let font_data = get_test_font_data();

    let mut renderer = ReportRenderer::new(&font_data).unwrap();
    let geometry = PageGeometry {
        font_size: -1.0,
        ..PageGeometry::default()
    };
    assert!(matches!(
        renderer.set_geometry(geometry),
        Err(ReportError::InvalidGeometry(_))
    ));
}
