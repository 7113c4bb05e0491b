//! Tests for constant-memory worksheets.

use crate::*;
use pretty_assertions::assert_eq;
use sheetpack::prelude::*;
use sheetpack::{Row, RowSpool, TempFileSpool};
use std::io;

/// Temp-file spool that rejects the row written at position `fail_at`, once
#[derive(Debug)]
struct FlakySpool {
    inner: TempFileSpool,
    fail_at: u64,
    failed: bool,
}

impl RowSpool for FlakySpool {
    fn write_row(&mut self, index: u32, row: &Row) -> Result<()> {
        if !self.failed && self.inner.rows_written() == self.fail_at {
            self.failed = true;
            return Err(Error::TmpFileIo(io::Error::new(
                io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.write_row(index, row)
    }

    fn copy_to(&mut self, out: &mut dyn io::Write) -> io::Result<u64> {
        self.inner.copy_to(out)
    }

    fn rows_written(&self) -> u64 {
        self.inner.rows_written()
    }
}

#[test]
fn test_streamed_rows_saved_in_order() {
    let mut workbook = Workbook::new();
    let idx = workbook
        .add_constant_memory_worksheet(Some("Stream"), StreamingPolicy::on_new_row())
        .unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        for row in 0..2_000u32 {
            sheet.write_number(row, 0, row as f64, None).unwrap();
            sheet.write_string(row, 1, "same", None).unwrap();
        }
    }

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    package.assert_well_formed();
    let xml = package.part("xl/worksheets/sheet1.xml");

    let rows = attribute_values(&xml, "row", "r");
    assert_eq!(rows.len(), 2_000);
    assert!(rows
        .iter()
        .enumerate()
        .all(|(i, r)| r.parse::<usize>().unwrap() == i + 1));
    assert_eq!(attribute_values(&xml, "dimension", "ref"), vec!["A1:B2000"]);
    assert_eq!(
        find_cell(&xml, "A2000").unwrap().value.as_deref(),
        Some("1999")
    );

    let sst = package.part("xl/sharedStrings.xml");
    assert_eq!(attribute_values(&sst, "sst", "count"), vec!["2000"]);
    assert_eq!(attribute_values(&sst, "sst", "uniqueCount"), vec!["1"]);
}

#[test]
fn test_ordering_violation_leaves_output_untouched() {
    let mut workbook = Workbook::new();
    let idx = workbook
        .add_constant_memory_worksheet(None, StreamingPolicy::on_new_row())
        .unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        sheet.write_number(0, 0, 1.0, None).unwrap();
        sheet.write_number(1, 0, 2.0, None).unwrap();
        sheet.write_number(2, 0, 3.0, None).unwrap();

        for row in [0, 1] {
            let err = sheet.write_number(row, 1, 9.0, None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OrderingViolation);
        }
        // the open row still accepts writes
        sheet.write_number(2, 1, 4.0, None).unwrap();
    }

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let xml = package.part("xl/worksheets/sheet1.xml");
    let refs: Vec<String> = sheet_cells(&xml).into_iter().map(|c| c.reference).collect();
    assert_eq!(refs, vec!["A1", "A2", "A3", "B3"]);
    assert_eq!(find_cell(&xml, "A2").unwrap().value.as_deref(), Some("2"));
}

#[test]
fn test_explicit_flush() {
    let dir = tempfile::tempdir().unwrap();
    let mut workbook = Workbook::new();
    let idx = workbook
        .add_constant_memory_worksheet(None, StreamingPolicy::explicit().with_temp_dir(dir.path()))
        .unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        // rows may arrive in any order until they are flushed
        sheet.write_number(5, 0, 5.0, None).unwrap();
        sheet.write_number(2, 0, 2.0, None).unwrap();
        sheet.write_number(9, 0, 9.0, None).unwrap();
        sheet.flush_through(5).unwrap();

        let err = sheet.write_number(3, 0, 3.0, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OrderingViolation);
        sheet.write_number(7, 0, 7.0, None).unwrap();

        // row options on a flushed row are ignored, not an error
        sheet.set_row(2, Some(40.0), None).unwrap();
    }

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    let xml = package.part("xl/worksheets/sheet1.xml");
    assert_eq!(attribute_values(&xml, "row", "r"), vec!["3", "6", "8", "10"]);
    assert!(attribute_values(&xml, "row", "ht").is_empty());
    assert_eq!(attribute_values(&xml, "dimension", "ref"), vec!["A3:A10"]);
}

#[test]
fn test_mixed_sheets_share_strings() {
    let mut workbook = Workbook::new();
    let plain = workbook.add_worksheet().unwrap();
    let streamed = workbook
        .add_constant_memory_worksheet(None, StreamingPolicy::on_new_row())
        .unwrap();

    workbook
        .worksheet_mut(streamed)
        .unwrap()
        .write_string(0, 0, "shared", None)
        .unwrap();
    workbook
        .worksheet_mut(plain)
        .unwrap()
        .write_string(4, 4, "shared", Some(&Format::new().bold()))
        .unwrap();

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    package.assert_well_formed();
    let first = package.part("xl/worksheets/sheet1.xml");
    let second = package.part("xl/worksheets/sheet2.xml");
    assert_eq!(
        find_cell(&first, "E5").unwrap().value,
        find_cell(&second, "A1").unwrap().value
    );

    let sst = package.part("xl/sharedStrings.xml");
    assert_eq!(attribute_values(&sst, "sst", "uniqueCount"), vec!["1"]);
    assert_eq!(attribute_values(&sst, "sst", "count"), vec!["2"]);
}

#[test]
fn test_failed_flush_keeps_unspooled_rows() {
    let mut workbook = Workbook::new();
    let spool = FlakySpool {
        inner: TempFileSpool::new().unwrap(),
        fail_at: 2,
        failed: false,
    };
    let idx = workbook
        .add_streaming_worksheet(None, FlushPolicy::Explicit, Box::new(spool))
        .unwrap();
    {
        let mut sheet = workbook.worksheet_mut(idx).unwrap();
        for row in 0..4u32 {
            sheet.write_number(row, 0, row as f64, None).unwrap();
        }

        let err = sheet.flush_through(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReadingTmpFile);
        assert_eq!(sheet.sheet().flushed_through(), Some(1));

        // rows the spool never took are still writable
        sheet.write_number(2, 1, 20.0, None).unwrap();
        let err = sheet.write_number(1, 1, 10.0, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OrderingViolation);
    }

    let mut package = Package::new(workbook.save_to_buffer().unwrap());
    package.assert_well_formed();
    let xml = package.part("xl/worksheets/sheet1.xml");
    assert_eq!(attribute_values(&xml, "row", "r"), vec!["1", "2", "3", "4"]);
    let refs: Vec<String> = sheet_cells(&xml).into_iter().map(|c| c.reference).collect();
    assert_eq!(refs, vec!["A1", "A2", "A3", "B3", "A4"]);
    assert_eq!(find_cell(&xml, "B3").unwrap().value.as_deref(), Some("20"));
}
