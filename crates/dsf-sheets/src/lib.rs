//! # dsf-sheets
//!
//! A small styled-worksheet model and an XLSX (Office Open XML) writer.
//!
//! ## Example
//!
//! ```rust
//! use dsf_sheets::{Color, Style, Workbook, XlsxWriter};
//!
//! let mut wb = Workbook::new();
//! let sheet = wb.add_worksheet("Averages").unwrap();
//! sheet.set_cell_value("A1", "Sequence ID").unwrap();
//! sheet.set_cell_style("A1", &Style::new().bold(true).fill_color(Color::rgb(0xD3, 0xD3, 0xD3))).unwrap();
//! sheet.set_cell_value("A2", 1.5).unwrap();
//!
//! let bytes = XlsxWriter::write_to_vec(&wb).unwrap();
//! assert!(bytes.starts_with(b"PK"));
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;
pub mod xlsx;

pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use error::{Error, Result};
pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, Style, StylePool, VerticalAlignment,
};
pub use workbook::Workbook;
pub use worksheet::{Worksheet, DEFAULT_COLUMN_WIDTH};
pub use xlsx::{XlsxWriter, XLSX_MIME_TYPE};

/// Maximum number of rows in a worksheet (Excel 2007+)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel 2007+)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
