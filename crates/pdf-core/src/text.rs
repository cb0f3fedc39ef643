//! Content stream operators for text and rules

use crate::document::Color;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Calculate X offset for text alignment inside a container
///
/// # Arguments
/// * `text_width` - Width of text in points
/// * `container_width` - Available width for alignment
/// * `align` - Desired alignment
pub fn calculate_x_offset(text_width: f64, container_width: f64, align: Align) -> f64 {
    match align {
        Align::Left => 0.0,
        Align::Center => (container_width - text_width) / 2.0,
        Align::Right => container_width - text_width,
    }
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, Tf, Td, Tj, ET) to render text
/// at a specific position with alignment support.
///
/// # Arguments
/// * `text_hex` - Hex-encoded text (e.g., "<0041004200>")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment relative to `x`
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let final_x = x + x_offset;

    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{final_x} {y} Td\n"));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Generate PDF operators for a stroked rectangle
///
/// # Arguments
/// * `x` - Left edge in PDF coordinates
/// * `y` - Bottom edge in PDF coordinates
/// * `width` - Rectangle width in points
/// * `height` - Rectangle height in points
/// * `line_width` - Stroke width in points
/// * `color` - Stroke color
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    line_width: f64,
    color: Color,
) -> Vec<u8> {
    let mut ops = String::new();

    // Isolate stroke state from later operators
    ops.push_str("q\n");
    ops.push_str(&format!("{} {} {} RG\n", color.r, color.g, color.b));
    ops.push_str(&format!("{line_width} w\n"));
    ops.push_str(&format!("{x} {y} {width} {height} re\n"));
    ops.push_str("S\n");
    ops.push_str("Q\n");

    ops.into_bytes()
}

/// Generate PDF operators for a straight line
pub fn generate_line_operators(
    from: (f64, f64),
    to: (f64, f64),
    line_width: f64,
    color: Color,
) -> Vec<u8> {
    let mut ops = String::new();

    ops.push_str("q\n");
    ops.push_str(&format!("{} {} {} RG\n", color.r, color.g, color.b));
    ops.push_str(&format!("{line_width} w\n"));
    ops.push_str(&format!("{} {} m\n", from.0, from.1));
    ops.push_str(&format!("{} {} l\n", to.0, to.1));
    ops.push_str("S\n");
    ops.push_str("Q\n");

    ops.into_bytes()
}
