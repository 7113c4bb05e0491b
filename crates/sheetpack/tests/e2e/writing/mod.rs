//! Writing tests - save workbooks and verify the archive with an external reader.

mod cells;
mod limits;
mod package;
mod streaming;
