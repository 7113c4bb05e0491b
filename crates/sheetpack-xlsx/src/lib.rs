//! # sheetpack-xlsx
//!
//! Serializes a [`sheetpack_core::Workbook`] into an Office Open XML
//! spreadsheet package.
//!
//! - [`XlsxWriter`] - renders every part and saves to a path, buffer or writer
//! - [`Packager`] - the ZIP container with its content types and relationships
//! - [`TempFileSpool`] - temp-file row storage for constant-memory worksheets

pub mod error;
pub mod packager;
pub mod parts;
pub mod spool;
pub mod writer;

mod xml;

pub use error::{XlsxError, XlsxResult};
pub use packager::{Packager, PackagerOptions, PackagerState, PartRelationship};
pub use spool::{ConstantMemoryExt, TempFileSpool};
pub use writer::XlsxWriter;
