//! Error types for dsf-report

use thiserror::Error;

/// Result type alias using [`ReportError`]
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that abort a report run; no bytes are produced when one occurs
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input parsing, aggregation or validation failed
    #[error(transparent)]
    Core(#[from] dsf_core::Error),

    /// The workbook could not be built or serialized
    #[error("Spreadsheet error: {0}")]
    Sheets(#[from] dsf_sheets::Error),
}

impl ReportError {
    /// The input-side error, if that is what failed
    pub fn as_core(&self) -> Option<&dsf_core::Error> {
        match self {
            ReportError::Core(err) => Some(err),
            ReportError::Sheets(_) => None,
        }
    }
}
