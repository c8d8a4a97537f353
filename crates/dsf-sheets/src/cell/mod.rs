//! Cell-related types

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::CellValue;

pub(crate) use value::format_number;

/// A stored cell: value plus an index into the worksheet's style pool
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    pub value: CellValue,
    pub style_index: u32,
}
