//! Renderers for the individual package parts
//!
//! Each module produces one kind of part. Renderers only read the workbook
//! model; archive entries, relationships and content types are the
//! packager's business.

pub mod content_types;
pub(crate) mod doc_props;
pub mod relationships;
pub(crate) mod shared_strings;
pub(crate) mod styles;
pub(crate) mod workbook;
pub mod worksheet;
