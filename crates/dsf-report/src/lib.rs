//! # dsf-report
//!
//! Turns an archive of DNA-shape measurement files and a FASTA-style sequence
//! list into a two-sheet XLSX report:
//!
//! - **Combined Data**: every table's columns plus its row mean, side by side,
//!   aligned with the sequence records
//! - **Averages**: one column of row means per table
//!
//! ## Example
//!
//! ```rust
//! use dsf_core::MemoryEntrySource;
//! use dsf_report::{generate_report_from_source, ReportOptions};
//!
//! let mut source = MemoryEntrySource::new()
//!     .with_entry("a.txt", "1 2\n3 4\n")
//!     .with_entry("b.txt", "5 6\n7 8\n");
//! let artifact = generate_report_from_source(
//!     &mut source,
//!     ">s1\nAAA\n>s2\nCCC\n",
//!     &ReportOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(artifact.summary.table_names, vec!["a", "b"]);
//! assert_eq!(artifact.file_name, "dna_structure_report.xlsx");
//! ```

pub mod error;
pub mod export;
pub mod layout;
pub mod options;
pub mod render;

pub use error::{ReportError, Result};
pub use export::{generate_report, generate_report_from_source, ReportArtifact, ReportSummary};
pub use layout::{
    CellRole, LayoutCell, LayoutValue, ReportLayout, SheetLayout, Span, AVERAGES_SHEET_NAME,
    COMBINED_SHEET_NAME,
};
pub use options::{ReportOptions, DEFAULT_FILE_NAME, DEFAULT_MAX_COLUMN_WIDTH};
pub use render::render;
