//! Report options

use dsf_core::{BatchOptions, DEFAULT_MARKER};

/// Default name of the generated workbook
pub const DEFAULT_FILE_NAME: &str = "dna_structure_report.xlsx";

/// Default cap for auto-sized column widths, in characters
pub const DEFAULT_MAX_COLUMN_WIDTH: f64 = 60.0;

/// Options for one report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Entry selection, failure policies and rounding
    pub batch: BatchOptions,
    /// Marker in front of sequence identifiers
    pub marker: char,
    /// Upper bound for auto-sized column widths; `None` leaves them uncapped
    pub max_column_width: Option<f64>,
    /// File name handed to the caller along with the bytes
    pub file_name: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            batch: BatchOptions::default(),
            marker: DEFAULT_MARKER,
            max_column_width: Some(DEFAULT_MAX_COLUMN_WIDTH),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}
