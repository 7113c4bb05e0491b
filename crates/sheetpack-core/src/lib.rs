//! # sheetpack-core
//!
//! Core data structures for the sheetpack XLSX writer.
//!
//! This crate holds everything a workbook is made of before it is packaged:
//! - [`Workbook`] and [`Worksheet`] - the document structure
//! - [`WorksheetMut`] - the write handle that validates every cell write
//! - [`StringTable`] and [`FormatTable`] - deduplication of strings and formats
//! - [`CellGrid`] - sparse, ordered cell storage with optional constant-memory rows
//! - [`ExcelDateTime`] - date/time to serial number conversion
//!
//! Serializing a workbook into an `.xlsx` archive is done by `sheetpack-xlsx`.
//!
//! ## Example
//!
//! ```rust
//! use sheetpack_core::{Format, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let idx = workbook.add_worksheet().unwrap();
//! let mut sheet = workbook.worksheet_mut(idx).unwrap();
//!
//! let bold = Format::new().bold();
//! sheet.write_string(0, 0, "Hello", Some(&bold)).unwrap();
//! sheet.write_number(0, 1, 42.0, None).unwrap();
//!
//! assert_eq!(workbook.strings().unique_count(), 1);
//! ```

pub mod cell;
pub mod datetime;
pub mod defined_name;
pub mod error;
pub mod format;
pub mod grid;
pub mod handle;
pub mod hyperlink;
pub mod image;
pub mod properties;
pub mod spool;
pub mod strings;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellError, CellRange, CellValue, FormulaResult};
pub use datetime::ExcelDateTime;
pub use defined_name::DefinedName;
pub use error::{Error, ErrorKind, Result};
pub use grid::{CellGrid, Dimension, Row, RowOptions};
pub use handle::WorksheetMut;
pub use hyperlink::{Hyperlink, HyperlinkTarget};
pub use image::{ImageInfo, ImageProbe, ImageType};
pub use properties::{CustomProperty, CustomValue, DocProperties};
pub use spool::{FlushPolicy, RowSpool, StreamingPolicy};
pub use strings::{StringIndex, StringTable};
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::{ColumnOptions, Worksheet};

pub use format::{
    Alignment, Border, BorderEdge, BorderLineStyle, Color, Fill, Font, Format, FormatIndex,
    FormatTable, HorizontalAlignment, NamedStyle, NumberFormat, PatternType, Protection,
    Underline, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum length of a string cell, in characters
pub const MAX_STRING_LEN: usize = 32_767;

/// Maximum length of a hyperlink
pub const MAX_URL_LEN: usize = 2_079;

/// Maximum number of hyperlinks in one worksheet
pub const MAX_URLS_PER_SHEET: usize = 65_530;
