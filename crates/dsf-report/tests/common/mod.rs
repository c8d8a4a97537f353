//! Shared helpers: build zip archives in memory and read generated workbooks back

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// Zip `(name, content)` pairs in the given order; names ending in `/` become directories
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content).unwrap();
            }
        }
        zip.finish().unwrap();
    }
    buf
}

/// Zip text entries
pub fn zip_text(entries: &[(&str, &str)]) -> Vec<u8> {
    let entries: Vec<(&str, &[u8])> = entries.iter().map(|(n, c)| (*n, c.as_bytes())).collect();
    zip_archive(&entries)
}

/// Resolved formatting of one cellXfs entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFormat {
    pub fill: Option<String>,
    pub bold: bool,
    pub font_color: Option<String>,
    pub border: Option<String>,
    pub horizontal: Option<String>,
}

/// One worksheet as read back from the package
#[derive(Debug, Default)]
pub struct SheetContents {
    /// A1 reference -> displayed text
    pub cells: BTreeMap<(u32, u32), String>,
    /// A1 reference -> cellXfs index
    pub styles: BTreeMap<(u32, u32), usize>,
    pub merges: Vec<String>,
    /// 1-based column -> width
    pub widths: BTreeMap<u32, f64>,
}

impl SheetContents {
    /// Texts of one 1-based row, from column A up to the last stored value
    pub fn row(&self, row: u32) -> Vec<String> {
        let last = self
            .cells
            .keys()
            .filter(|(r, _)| *r == row)
            .map(|(_, c)| *c)
            .max()
            .unwrap_or(0);
        (1..=last)
            .map(|col| self.text(row, col).to_string())
            .collect()
    }

    pub fn text(&self, row: u32, col: u32) -> &str {
        self.cells.get(&(row, col)).map_or("", String::as_str)
    }

    /// Highest row holding a stored value
    pub fn last_row(&self) -> u32 {
        self.cells.keys().map(|(r, _)| *r).max().unwrap_or(0)
    }
}

/// A generated workbook read back from its bytes
pub struct Report {
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetContents>,
    pub formats: Vec<CellFormat>,
}

impl Report {
    pub fn read(bytes: &[u8]) -> Self {
        let workbook = read_part(bytes, "xl/workbook.xml");
        let sheet_names = attribute_values(&workbook, b"sheet", b"name");
        let sheets = (1..=sheet_names.len())
            .map(|i| read_sheet(&read_part(bytes, &format!("xl/worksheets/sheet{i}.xml"))))
            .collect();
        let formats = read_formats(&read_part(bytes, "xl/styles.xml"));
        Self {
            sheet_names,
            sheets,
            formats,
        }
    }

    pub fn sheet(&self, name: &str) -> &SheetContents {
        let index = self
            .sheet_names
            .iter()
            .position(|n| n == name)
            .unwrap_or_else(|| panic!("no sheet named {name}"));
        &self.sheets[index]
    }

    /// Formatting of a 1-based cell, default when unstyled
    pub fn format(&self, sheet: &str, row: u32, col: u32) -> CellFormat {
        self.sheet(sheet)
            .styles
            .get(&(row, col))
            .map(|&xf| self.formats[xf].clone())
            .unwrap_or_default()
    }
}

pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .map(|a| a.unescape_value().unwrap().into_owned())
}

fn attribute_values(xml: &str, tag: &[u8], name: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == tag => {
                values.extend(attr(&e, name));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    values
}

/// Split "AB12" into 1-based (row, col)
fn position(reference: &str) -> (u32, u32) {
    let split = reference.find(|c: char| c.is_ascii_digit()).unwrap();
    let col = reference[..split]
        .bytes()
        .fold(0, |acc, b| acc * 26 + (b - b'A' + 1) as u32);
    (reference[split..].parse().unwrap(), col)
}

fn read_sheet(xml: &str) -> SheetContents {
    let mut reader = Reader::from_str(xml);
    let mut sheet = SheetContents::default();
    let mut current: Option<(u32, u32)> = None;
    let mut in_text = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"c" => {
                let pos = position(&attr(&e, b"r").unwrap());
                if let Some(s) = attr(&e, b"s") {
                    sheet.styles.insert(pos, s.parse().unwrap());
                }
                current = Some(pos);
            }
            Event::Start(e) if matches!(e.name().as_ref(), b"v" | b"t") => in_text = true,
            Event::End(e) if matches!(e.name().as_ref(), b"v" | b"t") => in_text = false,
            Event::Text(t) if in_text => {
                if let Some(pos) = current {
                    sheet.cells.insert(pos, t.unescape().unwrap().into_owned());
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"mergeCell" => {
                sheet.merges.extend(attr(&e, b"ref"));
            }
            Event::Empty(e) if e.name().as_ref() == b"col" => {
                let min: u32 = attr(&e, b"min").unwrap().parse().unwrap();
                let width: f64 = attr(&e, b"width").unwrap().parse().unwrap();
                sheet.widths.insert(min, width);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    sheet
}

#[derive(Default)]
struct Font {
    bold: bool,
    color: Option<String>,
}

fn read_formats(xml: &str) -> Vec<CellFormat> {
    let mut reader = Reader::from_str(xml);
    let mut fonts: Vec<Font> = Vec::new();
    let mut fills: Vec<Option<String>> = Vec::new();
    let mut borders: Vec<Option<String>> = Vec::new();
    let mut formats = Vec::new();
    let mut section: Vec<u8> = Vec::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if matches!(e.name().as_ref(), b"fonts" | b"fills" | b"borders" | b"cellXfs" | b"cellStyleXfs") => {
                section = e.name().as_ref().to_vec();
            }
            Event::Start(e) if e.name().as_ref() == b"font" => fonts.push(Font::default()),
            Event::Empty(e) if e.name().as_ref() == b"b" => {
                if let Some(font) = fonts.last_mut() {
                    font.bold = true;
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"color" && section == b"fonts" => {
                if let Some(font) = fonts.last_mut() {
                    font.color = attr(&e, b"rgb");
                }
            }
            Event::Start(e) if e.name().as_ref() == b"fill" => fills.push(None),
            Event::Empty(e) if e.name().as_ref() == b"fgColor" => {
                if let Some(fill) = fills.last_mut() {
                    *fill = attr(&e, b"rgb");
                }
            }
            Event::Start(e) if e.name().as_ref() == b"border" => borders.push(None),
            Event::Start(e) if e.name().as_ref() == b"left" => {
                if let Some(border) = borders.last_mut() {
                    *border = attr(&e, b"style");
                }
            }
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"xf" && section == b"cellXfs" => {
                let font = &fonts[attr(&e, b"fontId").unwrap().parse::<usize>().unwrap()];
                formats.push(CellFormat {
                    fill: fills[attr(&e, b"fillId").unwrap().parse::<usize>().unwrap()].clone(),
                    bold: font.bold,
                    font_color: font.color.clone(),
                    border: borders[attr(&e, b"borderId").unwrap().parse::<usize>().unwrap()].clone(),
                    horizontal: None,
                });
            }
            Event::Empty(e) if e.name().as_ref() == b"alignment" && section == b"cellXfs" => {
                if let Some(format) = formats.last_mut() {
                    format.horizontal = attr(&e, b"horizontal");
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    formats
}
