//! Rendering a [`ReportLayout`] onto a styled workbook

use dsf_sheets::{BorderStyle, CellRange, CellValue, Color, Style, Workbook, Worksheet};

use crate::error::Result;
use crate::layout::{CellRole, LayoutValue, ReportLayout, SheetLayout};

pub const GREY: Color = Color::rgb(0xD3, 0xD3, 0xD3);
pub const BLUE: Color = Color::rgb(0xB7, 0xDE, 0xE8);
pub const PINK: Color = Color::rgb(0xFC, 0xD5, 0xB4);
pub const GREEN: Color = Color::rgb(0x92, 0xD0, 0x50);
pub const MEAN_FONT: Color = Color::rgb(0x08, 0x13, 0xF8);

/// Extra characters added to the widest value of a column
const WIDTH_PADDING: f64 = 2.0;

/// Style for a role, or `None` for an unstyled cell
pub fn style_for(role: CellRole) -> Option<Style> {
    let thin = BorderStyle::thin();
    let style = match role {
        CellRole::Plain => return None,
        CellRole::ParametersHeader => Style::new()
            .fill_color(GREY)
            .bold(true)
            .centered()
            .border(BorderStyle::thick()),
        CellRole::TableHeader => Style::new().fill_color(GREY).centered().border(thin),
        CellRole::ColumnHeader => Style::new().bold(true).centered().border(thin),
        CellRole::IndexHeader => Style::new().fill_color(GREEN).border(thin),
        CellRole::MeanHeader => Style::new()
            .fill_color(GREEN)
            .bold(true)
            .centered()
            .border(thin),
        CellRole::SequenceId => Style::new().fill_color(PINK).border(thin),
        CellRole::Sequence => Style::new().fill_color(BLUE).border(thin),
        CellRole::Mean => Style::new().font_color(MEAN_FONT).border(thin),
        CellRole::Average => Style::new().border(thin),
    };
    Some(style)
}

fn cell_value(value: &LayoutValue) -> CellValue {
    match value {
        LayoutValue::Empty => CellValue::Empty,
        LayoutValue::Number(n) => CellValue::Number(*n),
        LayoutValue::Index(i) => CellValue::from(*i),
        LayoutValue::Text(s) => CellValue::String(s.clone()),
    }
}

/// Characters a value occupies when shown
fn display_len(value: &LayoutValue) -> usize {
    match value {
        LayoutValue::Empty => 0,
        LayoutValue::Index(i) => i.to_string().len(),
        LayoutValue::Text(s) => s.chars().count(),
        LayoutValue::Number(n) => CellValue::Number(*n).display_text().chars().count(),
    }
}

/// Width of every column: widest value plus padding, capped at `max_width`
pub fn column_widths(sheet: &SheetLayout, max_width: Option<f64>) -> Vec<f64> {
    (0..sheet.width())
        .map(|col| {
            let widest = sheet
                .rows()
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| display_len(&cell.value))
                .max()
                .unwrap_or(0);
            let width = widest as f64 + WIDTH_PADDING;
            max_width.map_or(width, |cap| width.min(cap))
        })
        .collect()
}

/// Build the styled workbook for a layout
pub fn render(layout: &ReportLayout, max_column_width: Option<f64>) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    for sheet in layout.sheets() {
        let worksheet = workbook.add_worksheet(sheet.name())?;
        render_sheet(sheet, worksheet, max_column_width)?;
    }
    Ok(workbook)
}

fn render_sheet(
    sheet: &SheetLayout,
    worksheet: &mut Worksheet,
    max_column_width: Option<f64>,
) -> Result<()> {
    for (r, row) in sheet.rows().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            let value = cell_value(&cell.value);
            if !value.is_empty() {
                worksheet.set_cell_value_at(r, c, value)?;
            }
            if let Some(style) = style_for(cell.role) {
                worksheet.set_cell_style_at(r, c, &style)?;
            }
        }
    }

    for span in sheet.merges() {
        worksheet.merge_cells(&CellRange::from_indices(
            span.row as u32,
            span.first_col as u16,
            span.row as u32,
            span.last_col as u16,
        ))?;
    }

    for (col, width) in column_widths(sheet, max_column_width).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width);
    }
    Ok(())
}
