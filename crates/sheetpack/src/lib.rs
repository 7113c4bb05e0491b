//! # sheetpack
//!
//! A Rust library for writing Excel `.xlsx` workbooks.
//!
//! ## Features
//!
//! - Numbers, strings, formulas, array formulas, booleans, errors and dates
//! - Shared-string and cell-format deduplication
//! - Fonts, fills, borders, alignment, protection and number formats
//! - Merged ranges, hyperlinks, defined names, document properties
//! - Constant-memory worksheets that spool finished rows to a temp file
//!
//! ## Example
//!
//! ```rust
//! use sheetpack::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let idx = workbook.add_worksheet().unwrap();
//! let mut sheet = workbook.worksheet_mut(idx).unwrap();
//!
//! sheet.write_string(0, 0, "Hello", None).unwrap();
//! sheet.write_number(0, 1, 42.0, Some(&Format::new().bold())).unwrap();
//! sheet.write_formula(0, 2, "=B1*2", None).unwrap();
//!
//! let bytes = workbook.save_to_buffer().unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! // workbook.save("output.xlsx").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use sheetpack_core::{
    // Cell types
    Cell,
    CellAddress,
    CellError,
    CellRange,
    CellValue,
    FormulaResult,

    // Format types
    Alignment,
    Border,
    BorderEdge,
    BorderLineStyle,
    Color,
    Fill,
    Font,
    Format,
    FormatIndex,
    FormatTable,
    HorizontalAlignment,
    NamedStyle,
    NumberFormat,
    PatternType,
    Protection,
    Underline,
    VerticalAlignment,

    // Main types
    DefinedName,
    ExcelDateTime,
    Hyperlink,
    HyperlinkTarget,
    StringIndex,
    StringTable,
    Workbook,
    WorkbookSettings,
    Worksheet,
    WorksheetMut,

    // Properties
    CustomProperty,
    CustomValue,
    DocProperties,

    // Streaming
    FlushPolicy,
    Row,
    RowSpool,
    StreamingPolicy,

    // Images
    ImageInfo,
    ImageProbe,
    ImageType,

    // Error types
    Error,
    ErrorKind,
    Result,

    // Constants
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
    MAX_STRING_LEN,
    MAX_URLS_PER_SHEET,
    MAX_URL_LEN,
};

// Re-export I/O types
pub use sheetpack_xlsx::{
    ConstantMemoryExt, Packager, PackagerOptions, PackagerState, PartRelationship, TempFileSpool,
    XlsxError, XlsxResult, XlsxWriter,
};

use std::io::{Seek, Write};
use std::path::Path;

/// Extension trait for Workbook to add file I/O
///
/// Saving takes `&mut self`: constant-memory worksheets are drained into
/// the archive, and an empty workbook gains a default "Sheet1".
pub trait WorkbookExt {
    /// Save the workbook as an `.xlsx` file
    ///
    /// The destination is replaced atomically; a failed save leaves any
    /// existing file untouched and creates nothing new.
    fn save<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()>;

    /// Save the workbook into `writer`, returning it once the archive is closed
    fn save_to_writer<W: Write + Seek>(&mut self, writer: W) -> XlsxResult<W>;

    /// Save the workbook into memory
    fn save_to_buffer(&mut self) -> XlsxResult<Vec<u8>>;
}

impl WorkbookExt for Workbook {
    fn save<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()> {
        XlsxWriter::new().write_file(self, path)
    }

    fn save_to_writer<W: Write + Seek>(&mut self, writer: W) -> XlsxResult<W> {
        XlsxWriter::new().write(self, writer)
    }

    fn save_to_buffer(&mut self) -> XlsxResult<Vec<u8>> {
        XlsxWriter::new().write_to_buffer(self)
    }
}
