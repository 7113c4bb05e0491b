//! Tests for cell values, formats and sheet layout as read back from the archive.

use crate::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sheetpack::prelude::*;
use sheetpack::CellAddress;

fn save_sheet(workbook: &mut Workbook) -> String {
    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    package.assert_well_formed();
    package.part("xl/worksheets/sheet1.xml")
}

fn cell(xml: &str, reference: &str) -> SheetCell {
    find_cell(xml, reference).unwrap_or_else(|| panic!("no cell {}", reference))
}

#[test]
fn test_value_types() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        sheet.write_number(0, 0, -1.25, None).unwrap();
        sheet.write_string(0, 1, "shared", None).unwrap();
        sheet.write_inline_string(0, 2, "inline", None).unwrap();
        sheet.write_formula(0, 3, "=A1*2", None).unwrap();
        sheet
            .write_formula_with_result(0, 4, "=B1&\"!\"", "shared!", None)
            .unwrap();
        sheet.write_boolean(0, 5, false, None).unwrap();
        sheet.write_error(0, 6, CellError::Na, None).unwrap();
        sheet.write_blank(0, 7, None).unwrap();
        sheet
            .write_blank(0, 8, Some(&Format::new().fill_color(Color::rgb(255, 0, 0))))
            .unwrap();
    }
    let xml = save_sheet(&mut workbook);

    assert_eq!(cell(&xml, "A1").value.as_deref(), Some("-1.25"));
    assert_eq!(cell(&xml, "B1").cell_type.as_deref(), Some("s"));

    let inline = cell(&xml, "C1");
    assert_eq!(inline.cell_type.as_deref(), Some("inlineStr"));
    assert_eq!(inline.value.as_deref(), Some("inline"));

    let formula = cell(&xml, "D1");
    assert_eq!(formula.formula.as_deref(), Some("A1*2"));
    assert_eq!(formula.value.as_deref(), Some("0"));

    let string_result = cell(&xml, "E1");
    assert_eq!(string_result.cell_type.as_deref(), Some("str"));
    assert_eq!(string_result.formula.as_deref(), Some("B1&\"!\""));
    assert_eq!(string_result.value.as_deref(), Some("shared!"));

    let boolean = cell(&xml, "F1");
    assert_eq!(boolean.cell_type.as_deref(), Some("b"));
    assert_eq!(boolean.value.as_deref(), Some("0"));

    let error = cell(&xml, "G1");
    assert_eq!(error.cell_type.as_deref(), Some("e"));
    assert_eq!(error.value.as_deref(), Some("#N/A"));

    // unformatted blanks are not written
    assert!(find_cell(&xml, "H1").is_none());
    let blank = cell(&xml, "I1");
    assert!(blank.style.is_some());
    assert_eq!(blank.value, None);
}

#[test]
fn test_cells_written_in_row_major_order() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        for &(row, col) in &[(9, 2), (0, 5), (9, 0), (3, 3), (0, 1)] {
            sheet.write_number(row, col, 1.0, None).unwrap();
        }
        // last write wins
        sheet.write_number(3, 3, 7.0, None).unwrap();
    }
    let xml = save_sheet(&mut workbook);

    let refs: Vec<String> = sheet_cells(&xml).into_iter().map(|c| c.reference).collect();
    assert_eq!(refs, vec!["B1", "F1", "D4", "A10", "C10"]);
    assert_eq!(attribute_values(&xml, "row", "r"), vec!["1", "4", "10"]);
    assert_eq!(attribute_values(&xml, "row", "spans"), vec!["2:6", "4:4", "1:3"]);
    assert_eq!(cell(&xml, "D4").value.as_deref(), Some("7"));
    assert_eq!(attribute_values(&xml, "dimension", "ref"), vec!["A1:F10"]);
}

#[test]
fn test_number_precision() {
    let values = [
        0.1,
        1.0 / 3.0,
        -2.5e-300,
        123_456_789.123_456_79,
        -2.5e20,
        1e15,
        999_999_999_999_999.0,
        f64::MIN_POSITIVE,
        f64::MAX,
    ];

    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        for (row, &n) in values.iter().enumerate() {
            sheet.write_number(row as u32, 0, n, None).unwrap();
        }
    }
    let xml = save_sheet(&mut workbook);

    let read: Vec<f64> = sheet_cells(&xml)
        .iter()
        .map(|c| c.value.as_deref().unwrap().parse().unwrap())
        .collect();
    assert_eq!(read, values.to_vec());
    assert_eq!(cell(&xml, "A1").value.as_deref(), Some("0.1"));
    assert_eq!(cell(&xml, "A7").value.as_deref(), Some("999999999999999"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn numbers_survive_the_archive(
        row in 0u32..1_048_576,
        col in 0u16..16_384,
        n in proptest::num::f64::NORMAL | proptest::num::f64::ZERO,
    ) {
        let mut workbook = Workbook::new();
        let idx = workbook.add_worksheet().unwrap();
        workbook.worksheet_mut(idx).unwrap().write_number(row, col, n, None).unwrap();
        let xml = save_sheet(&mut workbook);

        let cells = sheet_cells(&xml);
        prop_assert_eq!(cells.len(), 1);
        let expected = CellAddress::new(row, col).to_a1_string();
        prop_assert_eq!(&cells[0].reference, &expected);
        let back: f64 = cells[0].value.as_deref().unwrap().parse().unwrap();
        prop_assert_eq!(back, n);
    }
}

#[test]
fn test_dates() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        let date = |y, m, d| ExcelDateTime::from_ymd(y, m, d).unwrap();
        sheet.write_datetime(0, 0, &date(1900, 2, 28), None).unwrap();
        sheet.write_datetime(1, 0, &date(1900, 3, 1), None).unwrap();
        let noon = date(2013, 1, 23).and_hms(12, 0, 0.0).unwrap();
        sheet.write_datetime(2, 0, &noon, None).unwrap();
        let custom = Format::new().number_format("yyyy-mm-dd");
        sheet.write_datetime(3, 0, &date(2008, 1, 1), Some(&custom)).unwrap();
    }
    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let xml = package.part("xl/worksheets/sheet1.xml");

    assert_eq!(cell(&xml, "A1").value.as_deref(), Some("59"));
    assert_eq!(cell(&xml, "A2").value.as_deref(), Some("61"));
    assert_eq!(cell(&xml, "A3").value.as_deref(), Some("41297.5"));
    assert_eq!(cell(&xml, "A4").value.as_deref(), Some("39448"));

    // date cells carry a date number format
    assert_eq!(cell(&xml, "A1").style, cell(&xml, "A2").style);
    assert_ne!(cell(&xml, "A1").style, cell(&xml, "A3").style);
    let styles = package.part("xl/styles.xml");
    let num_fmt_ids = attribute_values(&styles, "xf", "numFmtId");
    assert!(num_fmt_ids.contains(&"14".to_string()));
    assert!(num_fmt_ids.contains(&"22".to_string()));
    assert!(num_fmt_ids.contains(&"164".to_string()));
    assert_eq!(
        attribute_values(&styles, "numFmt", "formatCode"),
        vec!["yyyy-mm-dd"]
    );
}

#[test]
fn test_1904_date_system() {
    let mut workbook = Workbook::with_settings(WorkbookSettings {
        date_1904: true,
        ..WorkbookSettings::default()
    });
    let idx = workbook.add_worksheet().unwrap();
    workbook
        .worksheet_mut(idx)
        .unwrap()
        .write_datetime(0, 0, &ExcelDateTime::from_ymd(2008, 1, 1).unwrap(), None)
        .unwrap();

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let xml = package.part("xl/worksheets/sheet1.xml");
    assert_eq!(cell(&xml, "A1").value.as_deref(), Some("37986"));
    let book = package.part("xl/workbook.xml");
    assert_eq!(attribute_values(&book, "workbookPr", "date1904"), vec!["1"]);
}

#[test]
fn test_formats_deduplicated() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        let bold = Format::new().bold();
        let also_bold = Format::new().bold();
        let italic = Format::new().italic();
        sheet.write_string(0, 0, "a", Some(&bold)).unwrap();
        sheet.write_string(1, 0, "b", Some(&also_bold)).unwrap();
        sheet.write_string(2, 0, "c", Some(&italic)).unwrap();
        sheet.write_string(3, 0, "a", None).unwrap();
    }
    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let xml = package.part("xl/worksheets/sheet1.xml");

    assert_eq!(cell(&xml, "A1").style, cell(&xml, "A2").style);
    assert_ne!(cell(&xml, "A1").style, cell(&xml, "A3").style);
    assert_eq!(cell(&xml, "A4").style, None);
    assert_eq!(cell(&xml, "A1").value, cell(&xml, "A4").value);

    let styles = package.part("xl/styles.xml");
    assert_eq!(attribute_values(&styles, "cellXfs", "count"), vec!["3"]);
    assert_eq!(attribute_values(&styles, "fonts", "count"), vec!["3"]);
    assert_eq!(attribute_values(&styles, "fills", "count"), vec!["2"]);
    assert_eq!(
        attribute_values(&styles, "patternFill", "patternType"),
        vec!["none", "gray125"]
    );

    let sst = package.part("xl/sharedStrings.xml");
    assert_eq!(attribute_values(&sst, "sst", "count"), vec!["4"]);
    assert_eq!(attribute_values(&sst, "sst", "uniqueCount"), vec!["3"]);
}

#[test]
fn test_text_escaping() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        sheet.write_string(0, 0, "a < b & \"c\"", None).unwrap();
        sheet.write_string(1, 0, "bell\u{7}", None).unwrap();
        sheet.write_string(2, 0, "_x0041_", None).unwrap();
        sheet.write_string(3, 0, "  padded", None).unwrap();
    }
    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    package.assert_well_formed();

    let sst = package.part("xl/sharedStrings.xml");
    assert!(sst.contains("<t>a &lt; b &amp; \"c\"</t>"));
    assert!(sst.contains("<t>bell_x0007_</t>"));
    assert!(sst.contains("<t>_x005F_x0041_</t>"));
    assert!(sst.contains("<t xml:space=\"preserve\">  padded</t>"));
}

#[test]
fn test_merged_and_array_ranges_lock_cells() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        sheet.merge_range(0, 0, 1, 1, "Merged", None).unwrap();

        let err = sheet.write_number(1, 1, 5.0, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterValidation);
        let err = sheet.merge_range(1, 1, 2, 2, "Overlap", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterValidation);
        // the anchor stays writable
        sheet.write_string(0, 0, "Anchor", None).unwrap();

        sheet
            .write_array_formula(3, 0, 4, 0, "{=C1:C2*2}", None)
            .unwrap();
        assert!(sheet.write_number(3, 0, 1.0, None).is_err());
        assert!(sheet.write_number(4, 0, 1.0, None).is_err());
    }
    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let xml = package.part("xl/worksheets/sheet1.xml");

    assert_eq!(attribute_values(&xml, "mergeCells", "count"), vec!["1"]);
    assert_eq!(attribute_values(&xml, "mergeCell", "ref"), vec!["A1:B2"]);
    assert!(xml.contains("<f t=\"array\" ref=\"A4:A5\">C1:C2*2</f>"));
    assert_eq!(cell(&xml, "A5").value.as_deref(), Some("0"));
    // unformatted blanks under a merge are not written
    assert!(find_cell(&xml, "B2").is_none());

    let sst = package.part("xl/sharedStrings.xml");
    assert!(sst.contains("<t>Anchor</t>"));
}

#[test]
fn test_hyperlinks() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet().unwrap();
    workbook.add_worksheet_with_name("Target").unwrap();
    {
        let mut sheet = workbook.worksheet_mut(0).unwrap();
        sheet.write_url(0, 0, "https://example.com/a?b=1&c=2", None).unwrap();
        sheet
            .write_url_with_text(1, 0, "internal:Target!A1", "Jump", Some("Go there"), None)
            .unwrap();
        sheet
            .write_url_with_text(2, 0, "mailto:ops@example.com", "Mail", None, None)
            .unwrap();
    }
    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    package.assert_well_formed();
    let xml = package.part("xl/worksheets/sheet1.xml");

    assert_eq!(attribute_values(&xml, "hyperlink", "ref"), vec!["A1", "A2", "A3"]);
    assert_eq!(attribute_values(&xml, "hyperlink", "r:id"), vec!["rId1", "rId2"]);
    assert_eq!(attribute_values(&xml, "hyperlink", "location"), vec!["Target!A1"]);
    assert_eq!(attribute_values(&xml, "hyperlink", "tooltip"), vec!["Go there"]);
    assert_eq!(
        attribute_values(&xml, "hyperlink", "display"),
        vec!["https://example.com/a?b=1&c=2", "Jump", "Mail"]
    );

    let rels = package.part("xl/worksheets/_rels/sheet1.xml.rels");
    assert_eq!(
        attribute_values(&rels, "Relationship", "Target"),
        vec!["https://example.com/a?b=1&c=2", "mailto:ops@example.com"]
    );
    assert_eq!(
        attribute_values(&rels, "Relationship", "TargetMode"),
        vec!["External", "External"]
    );
    assert!(!package.has("xl/worksheets/_rels/sheet2.xml.rels"));

    // link cells get the built-in Hyperlink style
    let styles = package.part("xl/styles.xml");
    assert_eq!(
        attribute_values(&styles, "cellStyle", "name"),
        vec!["Normal", "Hyperlink"]
    );
}

#[test]
fn test_rows_and_columns() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        sheet.set_column(0, 1, Some(20.0), None).unwrap();
        sheet.set_column_options(3, 3, None, true, None).unwrap();
        sheet.set_row(0, Some(30.0), None).unwrap();
        sheet.set_row_options(2, None, true, None).unwrap();
        sheet.write_number(0, 0, 1.0, None).unwrap();
    }
    let xml = save_sheet(&mut workbook);

    assert_eq!(attribute_values(&xml, "col", "min"), vec!["1", "4"]);
    assert_eq!(attribute_values(&xml, "col", "max"), vec!["2", "4"]);
    assert_eq!(
        attribute_values(&xml, "col", "width"),
        vec!["20.7109375", "9.140625"]
    );
    assert_eq!(attribute_values(&xml, "col", "hidden"), vec!["1"]);
    assert_eq!(attribute_values(&xml, "row", "ht"), vec!["30"]);
    assert_eq!(attribute_values(&xml, "row", "r"), vec!["1", "3"]);
    assert_eq!(attribute_values(&xml, "row", "hidden"), vec!["1"]);
}
