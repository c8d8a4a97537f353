//! Non-fatal conditions collected during a run

use std::fmt;

/// Kind of a non-fatal condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    /// An entry was excluded from the batch because it could not be parsed
    EntrySkipped,
    /// Two entries reduced to the same table name; the later one replaced the earlier
    DuplicateTableName,
    /// The sequence text had an odd number of lines
    OddSequenceLines,
    /// The number of sequence records differs from the common row count
    SequenceCountMismatch,
}

/// A non-fatal condition, reported alongside a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWarning {
    pub code: WarningCode,
    pub message: String,
    pub entry: Option<String>,
}

impl ReportWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            entry: None,
        }
    }

    #[must_use]
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(entry) => write!(f, "{:?} [{}]: {}", self.code, entry, self.message),
            None => write!(f, "{:?}: {}", self.code, self.message),
        }
    }
}
