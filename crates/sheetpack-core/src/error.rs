//! Error types for sheetpack-core

use std::fmt;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a workbook in memory.
///
/// Every variant is a validation or resource failure detected at the point of
/// the offending call. The call that returns one of these leaves the workbook
/// unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// Row or column index outside the worksheet grid
    #[error("Worksheet row or column index out of range: ({row}, {col})")]
    IndexOutOfRange { row: u32, col: u32 },

    /// Write to a row that a constant-memory worksheet has already flushed
    #[error("Row {row} has already been flushed (rows up to {flushed_through} are closed)")]
    RowAlreadyFlushed { row: u32, flushed_through: u32 },

    /// Write into a cell covered by a merged range or an array formula
    #[error("Cell {0} is covered by a merged range or array formula")]
    CellLocked(String),

    /// A new merged range or array formula overlaps an existing one
    #[error("Range {0} overlaps an existing merged range or array formula")]
    RangeOverlap(String),

    /// String cell value longer than 32,767 characters
    #[error("String exceeds Excel's limit of 32,767 characters")]
    MaxStringLengthExceeded,

    /// Parameter longer than 32 characters
    #[error("Parameter exceeds Excel's limit of 32 characters: {0}")]
    String32LengthExceeded(&'static str),

    /// Parameter longer than 128 characters
    #[error("Parameter exceeds Excel's limit of 128 characters: {0}")]
    String128LengthExceeded(&'static str),

    /// Parameter longer than 255 characters
    #[error("Parameter exceeds Excel's limit of 255 characters: {0}")]
    String255LengthExceeded(&'static str),

    /// Shared string index not present in the string table
    #[error("Error finding internal string index: {0}")]
    SharedStringIndexNotFound(u32),

    /// Format index not present in the format table
    #[error("Invalid format index: {0}")]
    FormatIndexNotFound(u32),

    /// Sheet name longer than 31 characters
    #[error("Worksheet name exceeds Excel's limit of 31 characters: {0}")]
    SheetNameLengthExceeded(String),

    /// Sheet name contains one of `[ ] : * ? / \`
    #[error("Worksheet name cannot contain invalid characters '[ ] : * ? / \\': {0}")]
    InvalidSheetNameCharacter(String),

    /// Sheet name starts or ends with an apostrophe
    #[error("Worksheet name cannot start or end with an apostrophe: {0}")]
    SheetNameStartEndApostrophe(String),

    /// Sheet name already used in the workbook (case-insensitive)
    #[error("Worksheet name is already in use: {0}")]
    SheetNameAlreadyUsed(String),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Hyperlink longer than 2,079 characters
    #[error("Maximum hyperlink length (2079) exceeded")]
    MaxUrlLengthExceeded,

    /// More than 65,530 hyperlinks in one worksheet
    #[error("Maximum number of worksheet URLs (65530) exceeded")]
    MaxNumberUrlsExceeded,

    /// A string parameter that must not be empty was empty
    #[error("Parameter is empty: {0}")]
    ParameterIsEmpty(&'static str),

    /// A parameter failed validation
    #[error("Parameter validation error: {0}")]
    ParameterValidation(String),

    /// Feature not supported in this configuration
    #[error("Feature is not currently supported in this configuration: {0}")]
    FeatureNotSupported(&'static str),

    /// Image metadata could not be determined
    #[error("Couldn't read image dimensions or DPI: {0}")]
    ImageDimensions(String),

    /// Creating a temp file for a constant-memory worksheet failed
    #[error("Error creating a tmpfile: {0}")]
    CreatingTmpFile(#[source] std::io::Error),

    /// Writing to or reading back a temp file failed
    #[error("Error reading or writing a tmpfile: {0}")]
    TmpFileIo(#[source] std::io::Error),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Error::RowAlreadyFlushed { .. } => ErrorKind::OrderingViolation,
            Error::CellLocked(_) | Error::RangeOverlap(_) => ErrorKind::ParameterValidation,
            Error::MaxStringLengthExceeded => ErrorKind::MaxStringLengthExceeded,
            Error::String32LengthExceeded(_) => ErrorKind::String32LengthExceeded,
            Error::String128LengthExceeded(_) => ErrorKind::String128LengthExceeded,
            Error::String255LengthExceeded(_) => ErrorKind::String255LengthExceeded,
            Error::SharedStringIndexNotFound(_) => ErrorKind::SharedStringIndexNotFound,
            Error::FormatIndexNotFound(_) => ErrorKind::ParameterValidation,
            Error::SheetNameLengthExceeded(_) => ErrorKind::SheetNameLengthExceeded,
            Error::InvalidSheetNameCharacter(_) => ErrorKind::InvalidSheetNameCharacter,
            Error::SheetNameStartEndApostrophe(_) => ErrorKind::SheetNameStartEndApostrophe,
            Error::SheetNameAlreadyUsed(_) => ErrorKind::SheetNameAlreadyUsed,
            Error::SheetOutOfBounds(..) => ErrorKind::ParameterValidation,
            Error::MaxUrlLengthExceeded => ErrorKind::MaxUrlLengthExceeded,
            Error::MaxNumberUrlsExceeded => ErrorKind::MaxNumberUrlsExceeded,
            Error::ParameterIsEmpty(_) => ErrorKind::ParameterIsEmpty,
            Error::ParameterValidation(_) => ErrorKind::ParameterValidation,
            Error::FeatureNotSupported(_) => ErrorKind::FeatureNotSupported,
            Error::ImageDimensions(_) => ErrorKind::ImageDimensions,
            Error::CreatingTmpFile(_) => ErrorKind::CreatingTmpFile,
            Error::TmpFileIo(_) => ErrorKind::ReadingTmpFile,
        }
    }
}

/// Closed classification of every failure the library can report.
///
/// Both the core [`Error`] and the archive-level error of the XLSX crate map
/// onto this enumeration, so callers can tell "disk full" from "bad
/// parameters" from "corrupt archive produced" without matching on either
/// concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MemoryAllocation,
    CreatingXlsxFile,
    CreatingTmpFile,
    ReadingTmpFile,
    ZipFileOperation,
    ZipParameter,
    ZipBadZipFile,
    ZipInternal,
    ZipFileAdd,
    ZipClose,
    FeatureNotSupported,
    NullParameterIgnored,
    ParameterValidation,
    ParameterIsEmpty,
    SheetNameLengthExceeded,
    InvalidSheetNameCharacter,
    SheetNameStartEndApostrophe,
    SheetNameAlreadyUsed,
    String32LengthExceeded,
    String128LengthExceeded,
    String255LengthExceeded,
    MaxStringLengthExceeded,
    SharedStringIndexNotFound,
    IndexOutOfRange,
    OrderingViolation,
    InvalidState,
    MaxUrlLengthExceeded,
    MaxNumberUrlsExceeded,
    ImageDimensions,
}

impl ErrorKind {
    /// Stable human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MemoryAllocation => "Memory error, failed to allocate required memory.",
            ErrorKind::CreatingXlsxFile => {
                "Error creating output xlsx file. Usually a permissions error."
            }
            ErrorKind::CreatingTmpFile => {
                "Error encountered when creating a tmpfile during file assembly."
            }
            ErrorKind::ReadingTmpFile => "Error reading a tmpfile.",
            ErrorKind::ZipFileOperation => "Zip generic error while creating the xlsx file.",
            ErrorKind::ZipParameter => "Zip parameter error while creating the xlsx file.",
            ErrorKind::ZipBadZipFile => "Zip bad zip file error (zip64 option may be required).",
            ErrorKind::ZipInternal => "Zip internal error while creating the xlsx file.",
            ErrorKind::ZipFileAdd => "File error or unknown zip error when adding a part.",
            ErrorKind::ZipClose => "Unknown zip error when closing the xlsx file.",
            ErrorKind::FeatureNotSupported => {
                "Feature is not currently supported in this configuration."
            }
            ErrorKind::NullParameterIgnored => "Missing function parameter ignored.",
            ErrorKind::ParameterValidation => "Function parameter validation error.",
            ErrorKind::ParameterIsEmpty => "Function string parameter is empty.",
            ErrorKind::SheetNameLengthExceeded => {
                "Worksheet name exceeds Excel's limit of 31 characters."
            }
            ErrorKind::InvalidSheetNameCharacter => {
                "Worksheet name cannot contain invalid characters: '[ ] : * ? / \\'"
            }
            ErrorKind::SheetNameStartEndApostrophe => {
                "Worksheet name cannot start or end with an apostrophe."
            }
            ErrorKind::SheetNameAlreadyUsed => "Worksheet name is already in use.",
            ErrorKind::String32LengthExceeded => "Parameter exceeds Excel's limit of 32 characters.",
            ErrorKind::String128LengthExceeded => {
                "Parameter exceeds Excel's limit of 128 characters."
            }
            ErrorKind::String255LengthExceeded => {
                "Parameter exceeds Excel's limit of 255 characters."
            }
            ErrorKind::MaxStringLengthExceeded => {
                "String exceeds Excel's limit of 32,767 characters."
            }
            ErrorKind::SharedStringIndexNotFound => "Error finding internal string index.",
            ErrorKind::IndexOutOfRange => "Worksheet row or column index out of range.",
            ErrorKind::OrderingViolation => {
                "Row has already been written in constant-memory mode."
            }
            ErrorKind::InvalidState => "Operation not valid after the archive was finalized.",
            ErrorKind::MaxUrlLengthExceeded => "Maximum hyperlink length (2079) exceeded.",
            ErrorKind::MaxNumberUrlsExceeded => {
                "Maximum number of worksheet URLs (65530) exceeded."
            }
            ErrorKind::ImageDimensions => "Couldn't read image dimensions or DPI.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a string parameter against one of Excel's fixed length limits.
///
/// Lengths are counted in characters, not bytes.
pub(crate) fn check_len(value: &str, max: usize, field: &'static str) -> Result<()> {
    if value.chars().count() <= max {
        return Ok(());
    }
    Err(match max {
        32 => Error::String32LengthExceeded(field),
        128 => Error::String128LengthExceeded(field),
        _ => Error::String255LengthExceeded(field),
    })
}
