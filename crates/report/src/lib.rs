//! Activity report generation
//!
//! This crate provides:
//! - Report input types and validation
//! - Page geometry configuration
//! - Text-height estimation with pluggable measurers
//! - The single-page layout composer
//! - PDF rendering and output file naming
//!
//! # Example
//!
//! ```ignore
//! use report::{ReportInput, ReportRenderer};
//!
//! let input = ReportInput::from_json(input_json)?;
//! let renderer = ReportRenderer::new(&std::fs::read("ipaexg.ttf")?)?;
//! let report = renderer.render(&input)?;
//! std::fs::write(&report.file_name, &report.bytes)?;
//! ```

pub mod config;
pub mod estimator;
pub mod layout;
mod naming;
mod renderer;
mod schema;
mod validation;

pub use config::{MeasureMode, PageGeometry};
pub use estimator::{
    AverageAdvanceMeasurer, FontMetricsMeasurer, TextEstimate, TextHeightEstimator, TextMeasurer,
};
pub use layout::{compose, BlockKind, Cursor, Layout, LayoutBlock, VAlign};
pub use naming::{report_file_name, DOCUMENT_NAME};
pub use renderer::{RenderedReport, ReportRenderer};
pub use schema::*;
pub use validation::ValidationError;

use thiserror::Error;

/// Errors that can occur while producing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;
