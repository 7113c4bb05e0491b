//! Tests for Excel's structural limits: names, string lengths, bounds and links.

use crate::*;
use pretty_assertions::assert_eq;
use sheetpack::prelude::*;
use sheetpack::{MAX_COLS, MAX_ROWS, MAX_STRING_LEN, MAX_URLS_PER_SHEET, MAX_URL_LEN};

#[test]
fn test_duplicate_sheet_name() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet_with_name("Sheet1").unwrap();

    let err = workbook.add_worksheet_with_name("sheet1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SheetNameAlreadyUsed);
    assert_eq!(workbook.sheet_count(), 1);

    // the generated name skips the taken one
    let idx = workbook.add_worksheet().unwrap();
    assert_eq!(workbook.worksheet(idx).unwrap().name(), "Sheet2");
}

#[test]
fn test_invalid_sheet_names() {
    let mut workbook = Workbook::new();
    let cases = [
        ("", ErrorKind::ParameterIsEmpty),
        ("a".repeat(32).as_str(), ErrorKind::SheetNameLengthExceeded),
        ("Q1/Q2", ErrorKind::InvalidSheetNameCharacter),
        ("[data]", ErrorKind::InvalidSheetNameCharacter),
        ("'quoted", ErrorKind::SheetNameStartEndApostrophe),
    ]
    .map(|(name, kind)| (name.to_string(), kind));

    for (name, kind) in cases {
        let err = workbook.add_worksheet_with_name(&name).unwrap_err();
        assert_eq!(err.kind(), kind, "sheet name {:?}", name);
    }
    assert!(workbook.is_empty());
    workbook.add_worksheet_with_name(&"b".repeat(31)).unwrap();
}

#[test]
fn test_string_length_limit() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        let too_long = "x".repeat(MAX_STRING_LEN + 1);
        let err = sheet.write_string(0, 0, &too_long, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MaxStringLengthExceeded);
        assert!(sheet.sheet().cell(0, 0).is_none());

        // the limit counts characters, not bytes
        let longest = "é".repeat(MAX_STRING_LEN);
        sheet.write_string(0, 1, &longest, None).unwrap();
    }
    assert_eq!(workbook.strings().unique_count(), 1);

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let xml = package.part("xl/worksheets/sheet1.xml");
    assert!(find_cell(&xml, "A1").is_none());
    assert_eq!(attribute_values(&xml, "dimension", "ref"), vec!["B1"]);
}

#[test]
fn test_cell_bounds() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    let mut sheet = workbook.worksheet_mut(idx).unwrap();

    let err = sheet.write_number(MAX_ROWS, 0, 1.0, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    let err = sheet.write_number(0, MAX_COLS, 1.0, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    sheet.write_number(MAX_ROWS - 1, MAX_COLS - 1, 1.0, None).unwrap();

    let err = sheet.write_number(0, 0, f64::NAN, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterValidation);
    assert!(sheet.sheet().cell(0, 0).is_none());

    drop(sheet);
    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let xml = package.part("xl/worksheets/sheet1.xml");
    assert_eq!(attribute_values(&xml, "dimension", "ref"), vec!["XFD1048576"]);
}

#[test]
fn test_url_length_limit() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    let mut sheet = workbook.worksheet_mut(idx).unwrap();

    let longest = format!("https://{}", "a".repeat(MAX_URL_LEN - 8));
    sheet.write_url(0, 0, &longest, None).unwrap();

    let too_long = format!("https://{}", "a".repeat(MAX_URL_LEN - 7));
    let err = sheet.write_url(1, 0, &too_long, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MaxUrlLengthExceeded);
    assert!(sheet.sheet().cell(1, 0).is_none());
    assert_eq!(sheet.sheet().hyperlink_count(), 1);
}

#[test]
fn test_url_count_limit() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        for i in 0..MAX_URLS_PER_SHEET as u32 {
            sheet.write_url(i, 0, "https://example.com", None).unwrap();
        }

        let err = sheet
            .write_url(MAX_URLS_PER_SHEET as u32, 0, "https://example.com", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MaxNumberUrlsExceeded);
        assert!(sheet.sheet().cell(MAX_URLS_PER_SHEET as u32, 0).is_none());

        // replacing an existing link does not count against the limit
        sheet
            .write_url_with_text(0, 0, "https://example.org", "replaced", None, None)
            .unwrap();
        assert_eq!(sheet.sheet().hyperlink_count(), MAX_URLS_PER_SHEET);
    }

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let rels = package.part("xl/worksheets/_rels/sheet1.xml.rels");
    let targets = attribute_values(&rels, "Relationship", "Target");
    assert_eq!(targets.len(), MAX_URLS_PER_SHEET);
    assert_eq!(targets[0], "https://example.org");
}

#[test]
fn test_font_size_out_of_range() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(0).unwrap();
        for size in [f64::NAN, -3.0, 0.5, 409.5] {
            let err = sheet
                .write_number(0, 0, 1.0, Some(&Format::new().font_size(size)))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ParameterValidation);
        }
        sheet
            .write_number(0, 0, 1.0, Some(&Format::new().font_size(14.0)))
            .unwrap();
    }

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let styles = package.part("xl/styles.xml");
    assert_eq!(attribute_values(&styles, "sz", "val"), vec!["11", "14"]);
}
