//! Tests for the package layout: parts, content types and relationships.

use crate::*;
use pretty_assertions::assert_eq;
use sheetpack::prelude::*;
use sheetpack::CustomValue;
use std::io::Cursor;

fn hello_world() -> Workbook {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    let mut sheet = workbook.worksheet_mut(idx).unwrap();
    sheet.write_string(0, 0, "Hello", None).unwrap();
    sheet.write_number(0, 1, 42.0, None).unwrap();
    workbook
}

#[test]
fn test_hello_world_package() {
    let mut workbook = hello_world();
    let mut package = Package::new(workbook.save_to_buffer().unwrap());

    assert_eq!(
        package.names(),
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/sharedStrings.xml",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );
    package.assert_well_formed();

    let content_types = package.part("[Content_Types].xml");
    let expected: Vec<(String, String)> = [
        ("/xl/workbook.xml", CT_WORKBOOK),
        ("/xl/worksheets/sheet1.xml", CT_WORKSHEET),
        ("/xl/styles.xml", CT_STYLES),
        ("/xl/sharedStrings.xml", CT_SHARED_STRINGS),
        ("/docProps/core.xml", CT_CORE),
        ("/docProps/app.xml", CT_APP),
    ]
    .iter()
    .map(|(p, c)| (p.to_string(), c.to_string()))
    .collect();
    assert_eq!(content_type_overrides(&content_types), expected);
    assert_eq!(
        attribute_values(&content_types, "Default", "Extension"),
        vec!["rels", "xml"]
    );

    let sst = package.part("xl/sharedStrings.xml");
    assert_eq!(attribute_values(&sst, "sst", "count"), vec!["1"]);
    assert_eq!(attribute_values(&sst, "sst", "uniqueCount"), vec!["1"]);
    assert!(sst.contains("<si><t>Hello</t></si>"));

    let sheet = package.part("xl/worksheets/sheet1.xml");
    let cells = sheet_cells(&sheet);
    assert_eq!(
        cells,
        vec![
            SheetCell {
                reference: "A1".into(),
                cell_type: Some("s".into()),
                value: Some("0".into()),
                ..SheetCell::default()
            },
            SheetCell {
                reference: "B1".into(),
                value: Some("42".into()),
                ..SheetCell::default()
            },
        ]
    );
    assert_eq!(attribute_values(&sheet, "dimension", "ref"), vec!["A1:B1"]);
}

#[test]
fn test_relationships_reach_every_part() {
    let mut workbook = hello_world();
    workbook.add_worksheet_with_name("Second").unwrap();
    let mut package = Package::new(workbook.save_to_buffer().unwrap());

    let root = package.part("_rels/.rels");
    assert_eq!(
        attribute_values(&root, "Relationship", "Target"),
        vec!["xl/workbook.xml", "docProps/core.xml", "docProps/app.xml"]
    );

    let book = package.part("xl/workbook.xml");
    let rels = package.part("xl/_rels/workbook.xml.rels");
    let ids = attribute_values(&rels, "Relationship", "Id");
    let targets = attribute_values(&rels, "Relationship", "Target");

    // every sheet's r:id resolves to its worksheet part
    for (n, rid) in attribute_values(&book, "sheet", "r:id").iter().enumerate() {
        let pos = ids.iter().position(|id| id == rid).unwrap();
        assert_eq!(targets[pos], format!("worksheets/sheet{}.xml", n + 1));
    }
    assert_eq!(
        attribute_values(&book, "sheet", "name"),
        vec!["Sheet1", "Second"]
    );
    assert!(targets.contains(&"styles.xml".to_string()));
    assert!(targets.contains(&"sharedStrings.xml".to_string()));
}

#[test]
fn test_no_shared_strings_part_without_strings() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet().unwrap();
    workbook
        .worksheet_mut(idx)
        .unwrap()
        .write_number(0, 0, 1.0, None)
        .unwrap();

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    assert!(!package.has("xl/sharedStrings.xml"));
    let content_types = package.part("[Content_Types].xml");
    assert!(!content_types.contains("sharedStrings"));
}

#[test]
fn test_save_to_file_and_writer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.xlsx");

    let mut workbook = hello_world();
    workbook.save(&path).unwrap();
    let mut from_file = Package::open(&path);

    let cursor = workbook.save_to_writer(Cursor::new(Vec::new())).unwrap();
    let mut from_writer = Package::new(cursor.into_inner());

    assert_eq!(from_file.names(), from_writer.names());
    assert_eq!(
        from_file.part("xl/worksheets/sheet1.xml"),
        from_writer.part("xl/worksheets/sheet1.xml")
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_failed_save_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("no-such-dir").join("out.xlsx");
    let err = hello_world().save(&missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CreatingXlsxFile);
    assert!(!missing.exists());

    // a directory in the way makes the final rename fail
    let blocked = dir.path().join("blocked.xlsx");
    std::fs::create_dir(&blocked).unwrap();
    let err = hello_world().save(&blocked).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CreatingXlsxFile);
    assert!(blocked.is_dir());

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("blocked.xlsx")]);
}

#[test]
fn test_document_and_custom_properties() {
    let mut workbook = hello_world();
    workbook
        .set_properties(
            DocProperties::new()
                .set_title("Quarterly <Report>")
                .set_author("Finance")
                .set_company("Acme"),
        )
        .unwrap();
    workbook.set_custom_property("Reviewed", true).unwrap();
    workbook
        .set_custom_property("Revision", CustomValue::Integer(3))
        .unwrap();

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    package.assert_well_formed();

    let core = package.part("docProps/core.xml");
    assert!(core.contains("<dc:title>Quarterly &lt;Report&gt;</dc:title>"));
    assert!(core.contains("<dc:creator>Finance</dc:creator>"));

    let app = package.part("docProps/app.xml");
    assert!(app.contains("<Company>Acme</Company>"));
    assert!(app.contains("<vt:lpstr>Sheet1</vt:lpstr>"));

    let custom = package.part("docProps/custom.xml");
    assert_eq!(
        attribute_values(&custom, "property", "name"),
        vec!["Reviewed", "Revision"]
    );
    let content_types = package.part("[Content_Types].xml");
    assert!(content_type_overrides(&content_types)
        .iter()
        .any(|(part, _)| part == "/docProps/custom.xml"));
}

#[test]
fn test_defined_names_and_sheet_state() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet_with_name("Data").unwrap();
    let hidden = workbook.add_worksheet_with_name("Lookup").unwrap();
    let report = workbook.add_worksheet_with_name("Report").unwrap();
    workbook.worksheet_mut(hidden).unwrap().set_hidden(true);
    workbook.set_active_sheet(report).unwrap();
    workbook.define_name("Rate", "=Data!$A$1").unwrap();
    workbook.define_name("Lookup!Keys", "=Lookup!$A:$A").unwrap();

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let book = package.part("xl/workbook.xml");
    assert_eq!(attribute_values(&book, "sheet", "state"), vec!["hidden"]);
    assert_eq!(attribute_values(&book, "workbookView", "activeTab"), vec!["2"]);
    assert_eq!(
        attribute_values(&book, "definedName", "name"),
        vec!["Keys", "Rate"]
    );
    assert_eq!(
        attribute_values(&book, "definedName", "localSheetId"),
        vec!["1"]
    );

    let report_xml = package.part("xl/worksheets/sheet3.xml");
    assert_eq!(
        attribute_values(&report_xml, "sheetView", "tabSelected"),
        vec!["1"]
    );
    let data_xml = package.part("xl/worksheets/sheet1.xml");
    assert!(attribute_values(&data_xml, "sheetView", "tabSelected").is_empty());
}

#[test]
fn test_compression_options() {
    let mut workbook = hello_world();
    let fast = XlsxWriter::with_options(PackagerOptions::default().with_compression_level(1))
        .write_to_buffer(&mut workbook)
        .unwrap();
    let best = XlsxWriter::with_options(
        PackagerOptions::default()
            .with_compression_level(9)
            .with_zip64(true),
    )
    .write_to_buffer(&mut workbook)
    .unwrap();
    assert_eq!(
        Package::new(fast).part("xl/worksheets/sheet1.xml"),
        Package::new(best).part("xl/worksheets/sheet1.xml")
    );

    let err = XlsxWriter::with_options(PackagerOptions::default().with_compression_level(12))
        .write_to_buffer(&mut workbook)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ZipParameter);
}
