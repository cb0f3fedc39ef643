//! PDF Core - Low-level PDF generation
//!
//! This crate provides functionality for:
//! - Creating blank single- or multi-page documents
//! - Embedding TrueType fonts (CID-keyed, Identity-H)
//! - Inserting text at top-origin coordinates
//! - Stroking rectangles and lines
//! - Serializing with Flate-compressed streams
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{PdfDocument, Align};
//!
//! let mut doc = PdfDocument::a4()?;
//! doc.add_font("gothic", &std::fs::read("IPAexGothic.ttf")?)?;
//! doc.set_font("gothic", 10.0)?;
//! doc.draw_rect(1, 50.0, 100.0, 495.28, 20.0)?;
//! doc.insert_text("事業内容報告書", 1, 297.64, 90.0, Align::Center)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod text;

pub use document::{Color, PdfDocument, A4_HEIGHT, A4_WIDTH};
pub use font::{FontData, FontObjects, REPRESENTATIVE_GLYPH};
pub use text::{
    calculate_x_offset, generate_line_operators, generate_rect_operators, generate_text_operators,
    TextRenderContext,
};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid page size: {0} x {1}")]
    InvalidPageSize(f64, f64),

    #[error("PDF structure error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
    }
}
