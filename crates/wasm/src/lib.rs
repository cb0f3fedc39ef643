//! WASM bindings for hokokusho
//!
//! This crate provides JavaScript-friendly API for:
//! - Validating and rendering activity reports to PDF
//! - Building the download file name
//! - Japanese era (wareki) date labels
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { ReportGenerator, Wareki, departments } from 'hokokusho-wasm';
//!
//! await init();
//!
//! const generator = new ReportGenerator(fontBytes);
//! const errors = generator.validate(input);
//! if (errors.length === 0) {
//!     const pdf = generator.render(input);
//!     download(pdf, generator.fileName(input));
//! }
//!
//! Wareki.formatDate(2025, 9, 2); // "令和7年9月2日"
//! ```

use report::{MeasureMode, PageGeometry, ReportInput, ReportRenderer};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Activity report generator
#[wasm_bindgen]
pub struct ReportGenerator {
    renderer: ReportRenderer,
}

#[wasm_bindgen]
impl ReportGenerator {
    /// Create a generator with the default A4 geometry
    ///
    /// @param fontBytes - TTF file bytes with Japanese glyphs (Uint8Array)
    #[wasm_bindgen(constructor)]
    pub fn new(font_bytes: &[u8]) -> Result<ReportGenerator, JsValue> {
        let renderer = ReportRenderer::new(font_bytes).map_err(to_js_error)?;
        Ok(ReportGenerator { renderer })
    }

    /// Replace the page geometry
    ///
    /// Missing keys keep their A4 defaults.
    ///
    /// @param json - Geometry JSON (e.g. `{ "fontSize": 11 }`)
    #[wasm_bindgen(js_name = setGeometry)]
    pub fn set_geometry(&mut self, json: &str) -> Result<(), JsValue> {
        let geometry = PageGeometry::from_json(json).map_err(to_js_error)?;
        self.renderer.set_geometry(geometry).map_err(to_js_error)
    }

    /// Select the text measurement strategy
    ///
    /// @param mode - "average" or "fontMetrics"
    #[wasm_bindgen(js_name = setMeasureMode)]
    pub fn set_measure_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: MeasureMode =
            serde_json::from_value(serde_json::Value::String(mode.to_string()))
                .map_err(|_| JsValue::from_str(&format!("Unknown measure mode: {mode}")))?;
        self.renderer.set_measure_mode(mode);
        Ok(())
    }

    /// Check report input
    ///
    /// @param input - Report input object
    /// @returns Array of error messages, empty when the input is valid
    pub fn validate(&self, input: JsValue) -> Result<js_sys::Array, JsValue> {
        let input: ReportInput = serde_wasm_bindgen::from_value(input)?;
        Ok(input
            .validation_errors()
            .iter()
            .map(|e| JsValue::from_str(&e.to_string()))
            .collect())
    }

    /// Render the report
    ///
    /// @param input - Report input object
    /// @returns PDF bytes (Uint8Array)
    pub fn render(&self, input: JsValue) -> Result<Vec<u8>, JsValue> {
        let input: ReportInput = serde_wasm_bindgen::from_value(input)?;
        let report = self.renderer.render(&input).map_err(to_js_error)?;
        Ok(report.bytes)
    }

    /// How far the composed page runs past the bottom margin
    ///
    /// @param input - Report input object
    /// @returns Overflow in points, or undefined when the page fits
    #[wasm_bindgen(js_name = layoutOverflow)]
    pub fn layout_overflow(&self, input: JsValue) -> Result<Option<f64>, JsValue> {
        let input: ReportInput = serde_wasm_bindgen::from_value(input)?;
        let layout = self.renderer.layout(&input).map_err(to_js_error)?;
        Ok(layout.overflow())
    }

    /// Download file name for a report
    ///
    /// @param input - Report input object
    /// @returns File name (e.g., "R7.09育成会事業報告書_育成会本部.pdf")
    #[wasm_bindgen(js_name = fileName)]
    pub fn file_name(&self, input: JsValue) -> Result<String, JsValue> {
        let input: ReportInput = serde_wasm_bindgen::from_value(input)?;
        Ok(report::report_file_name(input.report_date, input.department))
    }
}

/// Japanese era date utilities
#[wasm_bindgen]
pub struct Wareki;

#[wasm_bindgen]
impl Wareki {
    /// Format a date with its era
    ///
    /// @param year - Gregorian year
    /// @param month - Month (1-12)
    /// @param day - Day
    /// @returns Era date (e.g., "令和7年9月2日")
    #[wasm_bindgen(js_name = formatDate)]
    pub fn format_date(year: i32, month: u32, day: u32) -> Result<String, JsValue> {
        ja_text::try_format_wareki(year, month, day).map_err(to_js_error)
    }

    /// Short era tag of an era date label
    ///
    /// @param label - Era date (e.g., "令和７年９月２日")
    /// @returns Tag (e.g., "R7")
    #[wasm_bindgen(js_name = eraTag)]
    pub fn era_tag(label: &str) -> Result<String, JsValue> {
        ja_text::try_era_tag(label).map_err(to_js_error)
    }
}

/// Department names in form order
#[wasm_bindgen]
pub fn departments() -> js_sys::Array {
    report::Department::ALL
        .iter()
        .map(|dept| JsValue::from_str(dept.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_wareki_format_date() {
        assert_eq!(Wareki::format_date(2025, 9, 2).unwrap(), "令和7年9月2日");
        assert_eq!(Wareki::format_date(2000, 1, 1).unwrap(), "平成12年1月1日");
        assert_eq!(Wareki::format_date(1980, 1, 1).unwrap(), "西暦1980年1月1日");
    }

    #[wasm_bindgen_test]
    fn test_wareki_era_tag() {
        assert_eq!(Wareki::era_tag("令和７年９月２日").unwrap(), "R7");
        assert_eq!(Wareki::era_tag("平成12年1月1日").unwrap(), "H12");
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test]
    fn test_departments() {
        let names = departments();
        assert_eq!(names.length(), 13);
        assert_eq!(names.get(12).as_string().as_deref(), Some("育成会本部"));
    }
}
