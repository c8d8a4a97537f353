//! # dsf-core
//!
//! Input side of dsf-report: everything needed to turn an archive of
//! whitespace-delimited measurement files and a companion sequence file into
//! validated, row-aligned numeric tables. Nothing here knows about
//! spreadsheets.
//!
//! - [`SequenceList`] - ordered (identifier, sequence) records
//! - [`NumericTable`] - one parsed measurement entry plus its row means
//! - [`aggregate`] / [`validate`] - batch collection and the row-count gate
//! - [`EntrySource`] - where the named entries come from (ZIP or memory)
//!
//! ## Example
//!
//! ```rust
//! use dsf_core::{aggregate, validate, BatchOptions, MemoryEntrySource, SequenceList};
//!
//! let mut source = MemoryEntrySource::new()
//!     .with_entry("a.txt", "1 2\n3 4\n")
//!     .with_entry("b.txt", "5 6\n7 8\n");
//! let outcome = aggregate(&mut source, &BatchOptions::default()).unwrap();
//! let rows = validate(&outcome.tables).unwrap();
//! let sequences = SequenceList::parse(">s1\nAAA\n>s2\nCCC\n");
//!
//! assert_eq!(rows, 2);
//! assert_eq!(sequences.id_at(1), "s2");
//! assert_eq!(outcome.tables.get("b").unwrap().mean(1), Some(7.5));
//! ```

pub mod batch;
pub mod error;
pub mod options;
pub mod sequence;
pub mod source;
pub mod table;
pub mod warning;

pub use batch::{aggregate, validate, BatchOutcome, EntryFailure, TableSet};
pub use error::{Error, Result};
pub use options::{BatchOptions, DuplicatePolicy, ParseFailurePolicy};
pub use sequence::{SequenceList, SequenceRecord, DEFAULT_MARKER};
pub use source::{EntryInfo, EntrySource, MemoryEntrySource, ZipEntrySource};
pub use table::{parse_table, table_name, NumericMatrix, NumericTable, MEAN_LABEL};
pub use warning::{ReportWarning, WarningCode};
