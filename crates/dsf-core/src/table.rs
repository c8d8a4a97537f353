//! Measurement table parser
//!
//! A measurement entry is a block of whitespace-delimited numbers, one row per
//! line. Parsing produces a [`NumericTable`]: a rectangular matrix of optional
//! values (columns that are empty in every row are dropped) plus a derived
//! row-mean column.

use tracing::debug;

use crate::error::{Error, Result};

/// Tokens read as an empty cell rather than a number
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Header label of the derived column
pub const MEAN_LABEL: &str = "Mean";

/// Rectangular matrix of optional numbers with a fixed column count
#[derive(Debug, Clone, PartialEq)]
pub struct NumericMatrix {
    width: usize,
    height: usize,
    cells: Vec<Option<f64>>,
}

impl NumericMatrix {
    /// Build from rows that must all have exactly `width` cells
    pub fn new(width: usize, rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(Error::InvalidShape {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from rows of varying length, padding short rows with empty cells
    pub fn from_ragged(mut rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for values in &mut rows {
            values.resize(width, None);
        }
        Self::new(width, rows)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.height
    }

    /// Get one row
    pub fn row(&self, index: usize) -> Option<&[Option<f64>]> {
        if index >= self.height {
            return None;
        }
        let start = index * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        (0..self.height).map(move |index| {
            let start = index * self.width;
            &self.cells[start..start + self.width]
        })
    }

    /// Get a single cell
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col).copied().flatten()
    }

    /// Whether a column holds no value in any row
    pub fn column_is_empty(&self, col: usize) -> bool {
        self.rows().all(|row| row.get(col).copied().flatten().is_none())
    }

    /// Copy of the matrix without the columns that are empty in every row
    pub fn without_empty_columns(&self) -> Self {
        let keep: Vec<usize> = (0..self.width)
            .filter(|&col| !self.column_is_empty(col))
            .collect();
        if keep.len() == self.width {
            return self.clone();
        }
        let cells = self
            .rows()
            .flat_map(|row| keep.iter().map(move |&col| row[col]))
            .collect();
        Self {
            width: keep.len(),
            height: self.height,
            cells,
        }
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|c| c.map(&f)).collect(),
        }
    }
}

/// A parsed measurement entry: retained columns plus the derived mean column
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    name: String,
    values: NumericMatrix,
    means: Vec<Option<f64>>,
}

impl NumericTable {
    /// Drop empty columns, derive row means from the unrounded values, then round everything
    pub fn from_matrix(name: impl Into<String>, matrix: &NumericMatrix, decimals: u32) -> Self {
        let retained = matrix.without_empty_columns();
        let means = retained
            .rows()
            .map(row_mean)
            .map(|m| m.map(|v| round_to(v, decimals)))
            .collect();
        let values = retained.map(|v| round_to(v, decimals));

        Self {
            name: name.into(),
            values,
            means,
        }
    }

    /// Table name (entry base name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retained measurement columns, without the mean column
    pub fn column_count(&self) -> usize {
        self.values.width()
    }

    /// Columns including the derived mean column
    pub fn total_width(&self) -> usize {
        self.values.width() + 1
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.means.len()
    }

    /// Rounded retained values
    pub fn values(&self) -> &NumericMatrix {
        &self.values
    }

    /// Rounded row means
    pub fn means(&self) -> &[Option<f64>] {
        &self.means
    }

    /// Rounded mean of one row
    pub fn mean(&self, row: usize) -> Option<f64> {
        self.means.get(row).copied().flatten()
    }

    /// A full row: retained values followed by the mean
    pub fn full_row(&self, row: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values
            .row(row)
            .unwrap_or(&[])
            .iter()
            .copied()
            .chain(std::iter::once(self.mean(row)))
    }
}

/// Parse one entry's text into a table named after the entry's base name
pub fn parse_table(entry: &str, text: &str, decimals: u32) -> Result<NumericTable> {
    let matrix = parse_matrix(entry, text)?;
    if matrix.row_count() == 0 {
        return Err(Error::EmptyEntry {
            entry: entry.to_string(),
        });
    }
    let table = NumericTable::from_matrix(table_name(entry), &matrix, decimals);
    debug!(
        entry,
        rows = table.row_count(),
        columns = table.column_count(),
        dropped = matrix.width() - table.column_count(),
        "parsed measurement table"
    );
    Ok(table)
}

/// Read whitespace-delimited rows into a padded matrix.
///
/// Any run of whitespace separates two fields; blank lines are skipped.
/// The record reader splits on single spaces, so the empty fields produced by
/// repeated spaces are dropped and tab-joined fields are split again.
pub fn parse_matrix(entry: &str, text: &str) -> Result<NumericMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (record_idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(record_idx + 1, |pos| record_line(text, pos));
        let tokens: Vec<&str> = record.iter().flat_map(str::split_whitespace).collect();
        if tokens.is_empty() {
            continue;
        }
        let row = tokens
            .into_iter()
            .enumerate()
            .map(|(col, token)| {
                parse_cell(token).ok_or_else(|| Error::EntryParse {
                    entry: entry.to_string(),
                    line,
                    column: col + 1,
                    message: format!("'{token}' is not a number"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    NumericMatrix::from_ragged(rows)
}

/// 1-based line of a record. The reader records the position before skipping
/// empty lines, so step over any terminators that follow it.
fn record_line(text: &str, pos: &csv::Position) -> usize {
    let rest = usize::try_from(pos.byte())
        .ok()
        .and_then(|start| text.as_bytes().get(start..))
        .unwrap_or_default();
    let skipped = rest
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count();
    pos.line() as usize + skipped
}

/// Parse a single field: `Some(None)` for a missing value, `None` if not numeric.
///
/// Spellings that parse to a non-finite float (`NAN`, `Nan`, `inf`, ...) count as
/// missing; a workbook cell cannot hold them.
fn parse_cell(token: &str) -> Option<Option<f64>> {
    if MISSING_TOKENS.contains(&token) {
        return Some(None);
    }
    token
        .parse::<f64>()
        .ok()
        .map(|value| value.is_finite().then_some(value))
}

/// Arithmetic mean of the present cells of a row
pub fn row_mean(row: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = row
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Round half-to-even at `decimals` places after the point
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}

/// Base name of an entry: directory prefix and last extension removed
pub fn table_name(entry: &str) -> String {
    let file = entry.rsplit(['/', '\\']).next().unwrap_or(entry);
    match file.rfind('.') {
        Some(pos) if file[..pos].chars().any(|c| c != '.') => file[..pos].to_string(),
        _ => file.to_string(),
    }
}
