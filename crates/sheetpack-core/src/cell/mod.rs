//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`Cell`] - A value plus its registered format
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")

mod address;
mod value;

pub use address::{
    check_bounds, push_cell_ref, push_column_letters, push_range_ref, CellAddress, CellRange,
};
pub use value::{Cell, CellError, CellValue, FormulaResult};

pub(crate) use value::strip_formula_prefix;
