//! Report layout
//!
//! Positions every header, label and value of both report sheets as plain
//! data. Nothing here touches styles or the spreadsheet model; each cell only
//! carries a [`CellRole`] that the renderer later maps to a style.
//!
//! Combined Data (zero-based rows):
//!
//! ```text
//! row 0   PARAMETERS (A:B merged) | a (merged over a's span) | b ...
//! row 1   Sequence ID | Sequence  | 0 | 1 | Mean           | 0 | 1 | Mean
//! row 2.. s1          | AAA       | 1 | 2 | 1.5            | 5 | 6 | 5.5
//! ```
//!
//! Averages:
//!
//! ```text
//! row 0   Sequence ID | Sequence | a   | b
//! row 1.. s1          | AAA      | 1.5 | 5.5
//! ```

use dsf_core::{NumericTable, SequenceList, TableSet, MEAN_LABEL};

/// Name of the per-table detail sheet
pub const COMBINED_SHEET_NAME: &str = "Combined Data";
/// Name of the row-mean summary sheet
pub const AVERAGES_SHEET_NAME: &str = "Averages";

pub const PARAMETERS_LABEL: &str = "PARAMETERS";
pub const SEQUENCE_ID_LABEL: &str = "Sequence ID";
pub const SEQUENCE_LABEL: &str = "Sequence";

/// Columns reserved for the sequence identifier and value
pub const SEQUENCE_COLUMNS: usize = 2;

/// What a cell is, for styling purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellRole {
    /// No styling (measurement values, merged-over cells)
    Plain,
    /// The `PARAMETERS` band over the sequence columns
    ParametersHeader,
    /// A table name spanning its block
    TableHeader,
    /// `Sequence ID` / `Sequence` labels and the Averages header row
    ColumnHeader,
    /// Original column index of a measurement column
    IndexHeader,
    /// The `Mean` label of a block
    MeanHeader,
    /// A sequence identifier
    SequenceId,
    /// A sequence value
    Sequence,
    /// A row mean inside a table block
    Mean,
    /// A row mean on the Averages sheet
    Average,
}

/// Content of one layout cell
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutValue {
    Empty,
    Number(f64),
    /// Original column index, written as a number
    Index(usize),
    Text(String),
}

impl From<Option<f64>> for LayoutValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(LayoutValue::Empty, LayoutValue::Number)
    }
}

impl From<&str> for LayoutValue {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            LayoutValue::Empty
        } else {
            LayoutValue::Text(text.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCell {
    pub value: LayoutValue,
    pub role: CellRole,
}

impl LayoutCell {
    pub fn new(value: impl Into<LayoutValue>, role: CellRole) -> Self {
        Self {
            value: value.into(),
            role,
        }
    }

    fn blank() -> Self {
        Self::new(LayoutValue::Empty, CellRole::Plain)
    }
}

/// A horizontal merge within one row, columns inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

/// One sheet as a rectangular grid of cells plus merges
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    name: &'static str,
    rows: Vec<Vec<LayoutCell>>,
    merges: Vec<Span>,
}

impl SheetLayout {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rows(&self) -> &[Vec<LayoutCell>] {
        &self.rows
    }

    pub fn merges(&self) -> &[Span] {
        &self.merges
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&LayoutCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Number of rows, headers included
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Both report sheets, in workbook order
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub combined: SheetLayout,
    pub averages: SheetLayout,
}

impl ReportLayout {
    /// Lay out `tables` (in their iteration order) against `sequences`.
    ///
    /// One data row is emitted per row of the longest table; sequence records
    /// past the end of `sequences` render as empty cells.
    pub fn build(tables: &TableSet, sequences: &SequenceList) -> Self {
        let rows = tables.max_row_count();
        Self {
            combined: combined_sheet(tables, sequences, rows),
            averages: averages_sheet(tables, sequences, rows),
        }
    }

    pub fn sheets(&self) -> [&SheetLayout; 2] {
        [&self.combined, &self.averages]
    }
}

fn sequence_cells(sequences: &SequenceList, row: usize) -> [LayoutCell; 2] {
    [
        LayoutCell::new(sequences.id_at(row), CellRole::SequenceId),
        LayoutCell::new(sequences.sequence_at(row), CellRole::Sequence),
    ]
}

fn combined_sheet(tables: &TableSet, sequences: &SequenceList, rows: usize) -> SheetLayout {
    let width = SEQUENCE_COLUMNS + tables.iter().map(NumericTable::total_width).sum::<usize>();

    let mut band = Vec::with_capacity(width);
    band.push(LayoutCell::new(PARAMETERS_LABEL, CellRole::ParametersHeader));
    band.push(LayoutCell::blank());
    let mut merges = vec![Span {
        row: 0,
        first_col: 0,
        last_col: SEQUENCE_COLUMNS - 1,
    }];

    let mut labels = Vec::with_capacity(width);
    labels.push(LayoutCell::new(SEQUENCE_ID_LABEL, CellRole::ColumnHeader));
    labels.push(LayoutCell::new(SEQUENCE_LABEL, CellRole::ColumnHeader));

    for table in tables {
        let first_col = band.len();
        band.push(LayoutCell::new(table.name(), CellRole::TableHeader));
        band.extend((1..table.total_width()).map(|_| LayoutCell::blank()));
        if table.total_width() > 1 {
            merges.push(Span {
                row: 0,
                first_col,
                last_col: first_col + table.total_width() - 1,
            });
        }

        labels.extend(
            (0..table.column_count())
                .map(|i| LayoutCell::new(LayoutValue::Index(i), CellRole::IndexHeader)),
        );
        labels.push(LayoutCell::new(MEAN_LABEL, CellRole::MeanHeader));
    }

    let mut grid = Vec::with_capacity(rows + 2);
    grid.push(band);
    grid.push(labels);

    for row in 0..rows {
        let mut cells = Vec::with_capacity(width);
        cells.extend(sequence_cells(sequences, row));
        for table in tables {
            cells.extend(
                (0..table.column_count())
                    .map(|col| LayoutCell::new(table.values().get(row, col), CellRole::Plain)),
            );
            cells.push(LayoutCell::new(table.mean(row), CellRole::Mean));
        }
        grid.push(cells);
    }

    SheetLayout {
        name: COMBINED_SHEET_NAME,
        rows: grid,
        merges,
    }
}

fn averages_sheet(tables: &TableSet, sequences: &SequenceList, rows: usize) -> SheetLayout {
    let header = [SEQUENCE_ID_LABEL, SEQUENCE_LABEL]
        .into_iter()
        .chain(tables.names())
        .map(|label| LayoutCell::new(label, CellRole::ColumnHeader))
        .collect();

    let mut grid = Vec::with_capacity(rows + 1);
    grid.push(header);
    for row in 0..rows {
        let mut cells: Vec<LayoutCell> = sequence_cells(sequences, row).into();
        cells.extend(
            tables
                .iter()
                .map(|table| LayoutCell::new(table.mean(row), CellRole::Average)),
        );
        grid.push(cells);
    }

    SheetLayout {
        name: AVERAGES_SHEET_NAME,
        rows: grid,
        merges: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsf_core::parse_table;
    use pretty_assertions::assert_eq;

    fn tables(entries: &[(&str, &str)]) -> TableSet {
        let mut set = TableSet::new();
        for (entry, text) in entries {
            set.insert(parse_table(entry, text, 5).unwrap());
        }
        set
    }

    fn num(v: f64) -> LayoutValue {
        LayoutValue::Number(v)
    }

    fn values(sheet: &SheetLayout, row: usize) -> Vec<LayoutValue> {
        sheet.rows()[row].iter().map(|c| c.value.clone()).collect()
    }

    #[test]
    fn combined_rows_follow_table_order() {
        let set = tables(&[("a.txt", "1 2\n3 4\n"), ("b.txt", "5 6\n7 8\n")]);
        let layout = ReportLayout::build(&set, &SequenceList::parse(">s1\nAAA\n>s2\nCCC\n"));
        let sheet = &layout.combined;

        assert_eq!(sheet.height(), 4);
        assert_eq!(sheet.width(), 8);
        assert_eq!(
            values(sheet, 2),
            vec![
                LayoutValue::Text("s1".into()),
                LayoutValue::Text("AAA".into()),
                num(1.0),
                num(2.0),
                num(1.5),
                num(5.0),
                num(6.0),
                num(5.5),
            ]
        );
        assert_eq!(
            values(sheet, 3)[2..].to_vec(),
            vec![num(3.0), num(4.0), num(3.5), num(7.0), num(8.0), num(7.5)]
        );
    }

    #[test]
    fn combined_headers_and_merges() {
        let set = tables(&[("x/MGW.txt", "1 2 3\n"), ("Roll.txt", "4\n")]);
        let layout = ReportLayout::build(&set, &SequenceList::default());
        let sheet = &layout.combined;

        assert_eq!(
            sheet.merges(),
            &[
                Span { row: 0, first_col: 0, last_col: 1 },
                Span { row: 0, first_col: 2, last_col: 5 },
                Span { row: 0, first_col: 6, last_col: 7 },
            ]
        );
        assert_eq!(sheet.cell(0, 2).unwrap().value, LayoutValue::Text("MGW".into()));
        assert_eq!(sheet.cell(0, 2).unwrap().role, CellRole::TableHeader);
        assert_eq!(sheet.cell(0, 3).unwrap().role, CellRole::Plain);
        assert_eq!(sheet.cell(0, 6).unwrap().value, LayoutValue::Text("Roll".into()));
        assert_eq!(
            values(sheet, 1),
            vec![
                LayoutValue::Text("Sequence ID".into()),
                LayoutValue::Text("Sequence".into()),
                LayoutValue::Index(0),
                LayoutValue::Index(1),
                LayoutValue::Index(2),
                LayoutValue::Text("Mean".into()),
                LayoutValue::Index(0),
                LayoutValue::Text("Mean".into()),
            ]
        );
        assert_eq!(sheet.cell(1, 5).unwrap().role, CellRole::MeanHeader);
        assert_eq!(sheet.cell(2, 5).unwrap().role, CellRole::Mean);
    }

    #[test]
    fn single_column_block_is_not_merged() {
        let set = tables(&[("na.txt", "NA\nNA\n")]);
        let layout = ReportLayout::build(&set, &SequenceList::default());
        assert_eq!(layout.combined.merges().len(), 1);
        assert_eq!(layout.combined.width(), 3);
        assert_eq!(layout.combined.cell(2, 2).unwrap().value, LayoutValue::Empty);
    }

    #[test]
    fn short_sequence_list_pads_with_empty_cells() {
        let set = tables(&[("a.txt", "1\n2\n3\n")]);
        let layout = ReportLayout::build(&set, &SequenceList::parse(">only\nGATTACA"));

        for sheet in layout.sheets() {
            let offset = sheet.height() - 3;
            assert_eq!(sheet.cell(offset, 0).unwrap().value, LayoutValue::Text("only".into()));
            for row in offset + 1..sheet.height() {
                assert_eq!(sheet.cell(row, 0).unwrap().value, LayoutValue::Empty);
                assert_eq!(sheet.cell(row, 0).unwrap().role, CellRole::SequenceId);
                assert_eq!(sheet.cell(row, 1).unwrap().value, LayoutValue::Empty);
            }
        }
    }

    #[test]
    fn averages_sheet_holds_only_means() {
        let set = tables(&[("zeta.txt", "1 3\n"), ("alpha.txt", "10 20\n")]);
        let layout = ReportLayout::build(&set, &SequenceList::parse(">s\nAC\n"));
        let sheet = &layout.averages;

        assert_eq!(sheet.name(), AVERAGES_SHEET_NAME);
        assert_eq!(
            values(sheet, 0),
            vec![
                LayoutValue::Text("Sequence ID".into()),
                LayoutValue::Text("Sequence".into()),
                LayoutValue::Text("zeta".into()),
                LayoutValue::Text("alpha".into()),
            ]
        );
        assert_eq!(
            values(sheet, 1),
            vec![
                LayoutValue::Text("s".into()),
                LayoutValue::Text("AC".into()),
                num(2.0),
                num(15.0),
            ]
        );
        assert!(sheet.rows()[1][2..].iter().all(|c| c.role == CellRole::Average));
        assert!(sheet.merges().is_empty());
    }

    #[test]
    fn dropped_columns_do_not_appear() {
        let set = tables(&[("MGW.txt", "NA 1 3 NA\nNA 2 4 NA\n")]);
        let layout = ReportLayout::build(&set, &SequenceList::default());
        assert_eq!(
            values(&layout.combined, 3)[2..].to_vec(),
            vec![num(2.0), num(4.0), num(3.0)]
        );
    }
}
