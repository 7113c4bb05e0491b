//! Prelude module - common imports for sheetpack users
//!
//! ```rust
//! use sheetpack::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellError,
    CellValue,
    FormulaResult,

    // Format types
    BorderLineStyle,
    Color,
    Format,
    HorizontalAlignment,
    PatternType,
    Underline,
    VerticalAlignment,

    // Main types
    DocProperties,
    ExcelDateTime,
    Workbook,
    WorkbookSettings,
    Worksheet,
    WorksheetMut,

    // Streaming
    FlushPolicy,
    StreamingPolicy,

    // Error types
    Error,
    ErrorKind,
    Result,
    XlsxError,
    XlsxResult,

    // Extension traits
    ConstantMemoryExt,
    WorkbookExt,

    // I/O types
    PackagerOptions,
    XlsxWriter,
};
