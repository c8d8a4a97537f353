//! Batch options

/// What to do when one archive entry cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseFailurePolicy {
    /// Exclude the entry, record the failure and continue with the batch
    #[default]
    Skip,
    /// Abort the whole run on the first failing entry
    Abort,
}

/// What to do when two entries reduce to the same table name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Last entry wins; the table keeps the column position of the first one
    #[default]
    Replace,
    /// Fail the run
    Reject,
}

/// Options for aggregating a batch of measurement entries
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    /// Recognized entry extensions, without the leading dot (case-sensitive)
    pub extensions: Vec<String>,
    /// Entry-level failure handling
    pub parse_failure: ParseFailurePolicy,
    /// Table name collision handling
    pub duplicates: DuplicatePolicy,
    /// Number of decimal places every cell and mean is rounded to
    pub decimals: u32,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string()],
            parse_failure: ParseFailurePolicy::Skip,
            duplicates: DuplicatePolicy::Replace,
            decimals: 5,
        }
    }
}

impl BatchOptions {
    /// Check whether an entry name carries one of the recognized extensions
    pub fn accepts(&self, entry_name: &str) -> bool {
        self.extensions.iter().any(|ext| {
            entry_name.len() > ext.len()
                && entry_name.ends_with(ext.as_str())
                && entry_name[..entry_name.len() - ext.len()].ends_with('.')
        })
    }

    pub(crate) fn describe_extensions(&self) -> String {
        self.extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
