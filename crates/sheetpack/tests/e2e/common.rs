//! Common utilities for E2E tests.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A saved workbook opened as a ZIP archive
pub struct Package {
    archive: zip::ZipArchive<Cursor<Vec<u8>>>,
}

impl Package {
    pub fn new(bytes: Vec<u8>) -> Self {
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("not a zip archive");
        Self { archive }
    }

    pub fn open(path: &std::path::Path) -> Self {
        Self::new(std::fs::read(path).expect("failed to read saved file"))
    }

    /// Entry names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.archive.file_names().map(String::from).collect();
        names.sort();
        names
    }

    pub fn has(&self, name: &str) -> bool {
        self.archive.file_names().any(|n| n == name)
    }

    /// Read a part as UTF-8 text
    pub fn part(&mut self, name: &str) -> String {
        let mut file = self
            .archive
            .by_name(name)
            .unwrap_or_else(|_| panic!("missing part {}", name));
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    /// Parse every entry and fail on the first malformed one
    pub fn assert_well_formed(&mut self) {
        for name in self.names() {
            let xml = self.part(&name);
            assert!(
                xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"),
                "{} lacks the XML declaration",
                name
            );
            let mut reader = Reader::from_str(&xml);
            loop {
                match reader.read_event() {
                    Ok(Event::Eof) => break,
                    Ok(_) => {}
                    Err(e) => panic!("{} is not well-formed: {}", name, e),
                }
            }
        }
    }
}

/// A `<c>` element read back from a worksheet part
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SheetCell {
    pub reference: String,
    pub cell_type: Option<String>,
    pub style: Option<String>,
    pub formula: Option<String>,
    pub value: Option<String>,
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes()
        .map(|a| a.expect("bad attribute"))
        .find(|a| a.key.as_ref() == key.as_bytes())
        .map(|a| a.unescape_value().unwrap().into_owned())
}

/// Every cell of a worksheet part in document order
pub fn sheet_cells(xml: &str) -> Vec<SheetCell> {
    #[derive(PartialEq)]
    enum In {
        Nothing,
        Formula,
        Value,
    }

    let mut reader = Reader::from_str(xml);
    let mut cells = Vec::new();
    let mut current: Option<SheetCell> = None;
    let mut inside = In::Nothing;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => match e.name().as_ref() {
                b"c" => {
                    current = Some(SheetCell {
                        reference: attribute(&e, "r").unwrap(),
                        cell_type: attribute(&e, "t"),
                        style: attribute(&e, "s"),
                        ..SheetCell::default()
                    })
                }
                b"f" => inside = In::Formula,
                b"v" | b"t" => inside = In::Value,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"c" => cells.push(SheetCell {
                    reference: attribute(&e, "r").unwrap(),
                    cell_type: attribute(&e, "t"),
                    style: attribute(&e, "s"),
                    ..SheetCell::default()
                }),
                b"f" => {
                    if let Some(cell) = current.as_mut() {
                        cell.formula = Some(String::new());
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                let text = t.unescape().unwrap().into_owned();
                if let Some(cell) = current.as_mut() {
                    match inside {
                        In::Formula => cell.formula = Some(text),
                        In::Value => cell.value = Some(text),
                        In::Nothing => {}
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"c" => cells.extend(current.take()),
                b"f" | b"v" | b"t" => inside = In::Nothing,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    cells
}

/// The cell at `reference`, if the worksheet part contains it
pub fn find_cell(xml: &str, reference: &str) -> Option<SheetCell> {
    sheet_cells(xml).into_iter().find(|c| c.reference == reference)
}

/// Values of `attr` on every `element`, in document order
pub fn attribute_values(xml: &str, element: &str, attr: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == element.as_bytes() => {
                values.extend(attribute(&e, attr));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    values
}

/// `(PartName, ContentType)` of every `<Override>` in `[Content_Types].xml`
pub fn content_type_overrides(xml: &str) -> Vec<(String, String)> {
    attribute_values(xml, "Override", "PartName")
        .into_iter()
        .zip(attribute_values(xml, "Override", "ContentType"))
        .collect()
}

pub const CT_WORKBOOK: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
pub const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
pub const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
pub const CT_SHARED_STRINGS: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
pub const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";
