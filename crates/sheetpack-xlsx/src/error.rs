//! XLSX error types

use std::io;

use sheetpack_core::ErrorKind;
use thiserror::Error;
use zip::result::ZipError;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while packaging a workbook
///
/// Any of these aborts the save. Partial output is discarded: the archive
/// handle is dropped and a temp file written by `write_file` is removed.
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The output file (or its temp file) could not be created or persisted
    #[error("Error creating output xlsx file: {0}")]
    CreatingFile(#[source] io::Error),

    /// I/O failure while writing the archive
    #[error("IO error while writing the xlsx file: {0}")]
    Write(#[from] io::Error),

    /// The archive writer rejected a parameter
    #[error("Zip parameter error: {0}")]
    ZipParameter(String),

    /// The archive ended up malformed (the zip64 option may be required)
    #[error("Zip bad file error: {0}")]
    ZipBadFile(String),

    /// Any other archive writer failure
    #[error("Zip internal error: {0}")]
    ZipInternal(String),

    /// Operation not valid in the packager's current state
    #[error("Invalid packager state: {0}")]
    InvalidState(String),

    /// Validation error from the workbook model
    #[error("Core error: {0}")]
    Core(#[from] sheetpack_core::Error),
}

impl From<ZipError> for XlsxError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(e) => XlsxError::Write(e),
            ZipError::InvalidArchive(msg) => XlsxError::ZipBadFile(msg.to_string()),
            ZipError::UnsupportedArchive(msg) => XlsxError::ZipParameter(msg.to_string()),
            other => XlsxError::ZipInternal(other.to_string()),
        }
    }
}

impl XlsxError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            XlsxError::CreatingFile(_) => ErrorKind::CreatingXlsxFile,
            XlsxError::Write(_) => ErrorKind::ZipFileOperation,
            XlsxError::ZipParameter(_) => ErrorKind::ZipParameter,
            XlsxError::ZipBadFile(_) => ErrorKind::ZipBadZipFile,
            XlsxError::ZipInternal(_) => ErrorKind::ZipInternal,
            XlsxError::InvalidState(_) => ErrorKind::InvalidState,
            XlsxError::Core(e) => e.kind(),
        }
    }
}
