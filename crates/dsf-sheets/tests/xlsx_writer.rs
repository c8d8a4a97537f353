//! End-to-end tests for the XLSX writer (build -> write -> unzip -> inspect XML)

use std::io::{Cursor, Read};

use dsf_sheets::{
    BorderStyle, CellRange, Color, Style, Workbook, XlsxWriter,
};
use pretty_assertions::assert_eq;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

/// (cell ref, inline or numeric text) pairs in document order
fn cell_texts(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    let mut cells = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"c" => {
                let r = e.try_get_attribute("r").unwrap().unwrap();
                current = Some(String::from_utf8(r.value.to_vec()).unwrap());
            }
            Event::Start(e) if matches!(e.name().as_ref(), b"v" | b"t") => in_text = true,
            Event::End(e) if matches!(e.name().as_ref(), b"v" | b"t") => in_text = false,
            Event::Text(t) if in_text => {
                if let Some(r) = current.take() {
                    cells.push((r, t.unescape().unwrap().into_owned()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    cells
}

fn sample_workbook() -> Workbook {
    let mut wb = Workbook::new();
    let data = wb.add_worksheet("Combined Data").unwrap();
    data.set_cell_value("A1", "PARAMETERS").unwrap();
    data.set_cell_style(
        "A1",
        &Style::new()
            .bold(true)
            .fill_color(Color::rgb(0xD3, 0xD3, 0xD3))
            .border(BorderStyle::thick())
            .centered(),
    )
    .unwrap();
    data.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap();
    data.set_cell_value("A2", "R&D <1>").unwrap();
    data.set_cell_value("C2", 1.25).unwrap();
    data.set_column_width(0, 14.0);

    let averages = wb.add_worksheet("Averages").unwrap();
    averages.set_cell_value("A1", "Sequence ID").unwrap();
    wb
}

#[test]
fn test_package_parts() {
    let bytes = XlsxWriter::write_to_vec(&sample_workbook()).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(&bytes)).unwrap();
    let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
            "xl/worksheets/sheet2.xml",
        ]
    );
}

#[test]
fn test_sheet_order_and_names() {
    let bytes = XlsxWriter::write_to_vec(&sample_workbook()).unwrap();
    let workbook_xml = read_part(&bytes, "xl/workbook.xml");
    let first = workbook_xml.find("name=\"Combined Data\" sheetId=\"1\"").unwrap();
    let second = workbook_xml.find("name=\"Averages\" sheetId=\"2\"").unwrap();
    assert!(first < second);
}

#[test]
fn test_cells_merges_and_widths() {
    let bytes = XlsxWriter::write_to_vec(&sample_workbook()).unwrap();
    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

    assert_eq!(
        cell_texts(&sheet),
        vec![
            ("A1".to_string(), "PARAMETERS".to_string()),
            ("A2".to_string(), "R&D <1>".to_string()),
            ("C2".to_string(), "1.25".to_string()),
        ]
    );
    assert!(sheet.contains("<mergeCell ref=\"A1:B1\"/>"));
    assert!(sheet.contains("<col min=\"1\" max=\"1\" width=\"14\" customWidth=\"1\"/>"));
    assert!(sheet.contains("<dimension ref=\"A1:C2\"/>"));
    assert!(sheet.contains("<c r=\"A1\" s=\"1\""));
}

#[test]
fn test_styles_part() {
    let bytes = XlsxWriter::write_to_vec(&sample_workbook()).unwrap();
    let styles = read_part(&bytes, "xl/styles.xml");
    assert!(styles.contains("<fgColor rgb=\"FFD3D3D3\"/>"));
    assert!(styles.contains("<cellXfs count=\"2\">"));
}

#[test]
fn test_write_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    XlsxWriter::write_file(&sample_workbook(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let sheet = read_part(&bytes, "xl/worksheets/sheet2.xml");
    assert_eq!(
        cell_texts(&sheet),
        vec![("A1".to_string(), "Sequence ID".to_string())]
    );
}

#[test]
fn test_empty_workbook_is_rejected() {
    assert!(matches!(
        XlsxWriter::write_to_vec(&Workbook::new()),
        Err(dsf_sheets::Error::EmptyWorkbook)
    ));
}
