//! End-to-end tests for sheetpack.
//!
//! Each test builds the workbook it needs, saves it to memory or to a temp
//! directory, then opens the archive with `zip` and reads the parts back
//! with `quick-xml`, independently of the writer's own rendering code.

mod common;
mod writing;

// Re-export common utilities for submodules
pub use common::*;
