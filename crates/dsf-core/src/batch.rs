//! Batch aggregation and the row-count validation gate

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::options::{BatchOptions, DuplicatePolicy, ParseFailurePolicy};
use crate::source::{decode_text, EntrySource};
use crate::table::{parse_table, NumericTable};
use crate::warning::{ReportWarning, WarningCode};

/// Tables keyed by name, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: Vec<NumericTable>,
    index: HashMap<String, usize>,
}

impl TableSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table, returning the table it replaced.
    ///
    /// A replacement keeps the position of the table it replaces.
    pub fn insert(&mut self, table: NumericTable) -> Option<NumericTable> {
        match self.index.get(table.name()) {
            Some(&pos) => Some(std::mem::replace(&mut self.tables[pos], table)),
            None => {
                self.index.insert(table.name().to_string(), self.tables.len());
                self.tables.push(table);
                None
            }
        }
    }

    /// Look up a table by name
    pub fn get(&self, name: &str) -> Option<&NumericTable> {
        self.index.get(name).map(|&pos| &self.tables[pos])
    }

    /// Check whether a table name is present
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if there are no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, NumericTable> {
        self.tables.iter()
    }

    /// Table names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(NumericTable::name)
    }

    /// Row count of every table, in insertion order
    pub fn row_counts(&self) -> Vec<(String, usize)> {
        self.tables
            .iter()
            .map(|t| (t.name().to_string(), t.row_count()))
            .collect()
    }

    /// Largest row count across all tables
    pub fn max_row_count(&self) -> usize {
        self.tables
            .iter()
            .map(NumericTable::row_count)
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a TableSet {
    type Item = &'a NumericTable;
    type IntoIter = std::slice::Iter<'a, NumericTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// An entry excluded from the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub entry: String,
    pub reason: String,
}

/// Result of aggregating one archive
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Parsed tables in enumeration order
    pub tables: TableSet,
    /// Entries that were excluded
    pub failures: Vec<EntryFailure>,
    /// Non-fatal conditions
    pub warnings: Vec<ReportWarning>,
    /// Number of entries with a recognized extension
    pub considered: usize,
}

impl BatchOutcome {
    /// Row count of every surviving table, in table order
    pub fn row_counts(&self) -> Vec<(String, usize)> {
        self.tables.row_counts()
    }
}

/// Parse every qualifying entry of `source` into a table.
///
/// Entries are processed strictly in enumeration order; that order becomes the
/// column order of the report.
pub fn aggregate<S: EntrySource + ?Sized>(
    source: &mut S,
    options: &BatchOptions,
) -> Result<BatchOutcome> {
    let qualifying: Vec<_> = source
        .list()?
        .into_iter()
        .filter(|e| !e.is_dir && options.accepts(&e.name))
        .collect();

    if qualifying.is_empty() {
        return Err(Error::EmptyBatch {
            extensions: options.describe_extensions(),
        });
    }

    let mut outcome = BatchOutcome {
        considered: qualifying.len(),
        ..BatchOutcome::default()
    };

    for entry in &qualifying {
        let parsed = source
            .read(entry.index)
            .map_err(|err| Error::EntryRead {
                entry: entry.name.clone(),
                message: err.to_string(),
            })
            .and_then(|bytes| {
                decode_text(bytes).ok_or_else(|| Error::EntryEncoding {
                    entry: entry.name.clone(),
                })
            })
            .and_then(|text| parse_table(&entry.name, &text, options.decimals));

        let table = match parsed {
            Ok(table) => table,
            Err(err) if err.is_entry_level() => {
                if options.parse_failure == ParseFailurePolicy::Abort {
                    return Err(err);
                }
                warn!(entry = %entry.name, error = %err, "skipping entry");
                outcome.warnings.push(
                    ReportWarning::new(WarningCode::EntrySkipped, err.to_string())
                        .with_entry(&entry.name),
                );
                outcome.failures.push(EntryFailure {
                    entry: entry.name.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
            Err(err) => return Err(err),
        };

        if outcome.tables.contains(table.name()) {
            if options.duplicates == DuplicatePolicy::Reject {
                return Err(Error::DuplicateTableName {
                    name: table.name().to_string(),
                });
            }
            warn!(entry = %entry.name, table = table.name(), "table name collision, replacing earlier table");
            outcome.warnings.push(
                ReportWarning::new(
                    WarningCode::DuplicateTableName,
                    format!("replaces the earlier table '{}'", table.name()),
                )
                .with_entry(&entry.name),
            );
        }
        debug!(entry = %entry.name, table = table.name(), "collected table");
        outcome.tables.insert(table);
    }

    if outcome.tables.is_empty() {
        return Err(Error::NoSurvivingTables {
            failed: outcome.failures.len(),
        });
    }

    info!(
        tables = outcome.tables.len(),
        skipped = outcome.failures.len(),
        "aggregated batch"
    );
    Ok(outcome)
}

/// Require every table to share one row count, and return it
pub fn validate(tables: &TableSet) -> Result<usize> {
    let mut counts = tables.iter().map(NumericTable::row_count);
    let Some(first) = counts.next() else {
        return Err(Error::EmptyBatch {
            extensions: String::new(),
        });
    };
    if counts.all(|c| c == first) {
        Ok(first)
    } else {
        Err(Error::StructuralMismatch {
            counts: tables.row_counts(),
        })
    }
}
