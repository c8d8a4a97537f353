//! Error types for dsf-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing inputs and aggregating a batch
#[derive(Debug, Error)]
pub enum Error {
    /// The archive contained no entry with a recognized extension
    #[error("Archive contains no entries with a recognized extension ({extensions})")]
    EmptyBatch { extensions: String },

    /// Every qualifying entry failed to parse
    #[error("None of the {failed} qualifying entries could be parsed into a numeric table")]
    NoSurvivingTables { failed: usize },

    /// Tables disagree on their row count
    #[error("Not all files have the same number of rows: {}", format_counts(.counts))]
    StructuralMismatch { counts: Vec<(String, usize)> },

    /// An entry's content is not a whitespace-delimited numeric table
    #[error("Entry '{entry}': {message} (line {line}, column {column})")]
    EntryParse {
        entry: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// An entry contained no data rows at all
    #[error("Entry '{entry}' contains no numeric rows")]
    EmptyEntry { entry: String },

    /// An entry's bytes are not valid UTF-8
    #[error("Entry '{entry}' is not valid UTF-8 text")]
    EntryEncoding { entry: String },

    /// An entry's stored bytes could not be extracted (bad checksum, unsupported method)
    #[error("Entry '{entry}' could not be read: {message}")]
    EntryRead { entry: String, message: String },

    /// Two entries reduce to the same table name
    #[error("Two entries share the table name '{name}'")]
    DuplicateTableName { name: String },

    /// A matrix row does not match the declared width
    #[error("Row {row} has {found} cells, expected {expected}")]
    InvalidShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Archive could not be opened or read
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-record reader error
    #[error("Record error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error concerns a single entry and may be isolated from the batch
    pub fn is_entry_level(&self) -> bool {
        matches!(
            self,
            Error::EntryParse { .. }
                | Error::EmptyEntry { .. }
                | Error::EntryEncoding { .. }
                | Error::EntryRead { .. }
        )
    }
}

fn format_counts(counts: &[(String, usize)]) -> String {
    counts
        .iter()
        .map(|(name, rows)| format!("{name}={rows}"))
        .collect::<Vec<_>>()
        .join(", ")
}
