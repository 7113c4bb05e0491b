//! Row spool seam for constant-memory worksheets

use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::Result;
use crate::grid::Row;

/// Destination for rows evicted from a constant-memory worksheet
///
/// Rows arrive in strictly ascending order and are serialized immediately;
/// once written they are dropped from memory. The implementation owns its
/// backing storage and releases it on drop.
pub trait RowSpool: Send + std::fmt::Debug {
    /// Serialize one row
    fn write_row(&mut self, index: u32, row: &Row) -> Result<()>;

    /// Copy every serialized row, in order, into `out`
    ///
    /// The bytes land verbatim inside `<sheetData>`, so they must be
    /// complete SpreadsheetML `<row>` elements.
    fn copy_to(&mut self, out: &mut dyn Write) -> io::Result<u64>;

    /// Number of rows written so far
    fn rows_written(&self) -> u64;
}

/// When buffered rows of a constant-memory worksheet are flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Only [`flush_through`](crate::Worksheet::flush_through) flushes rows
    Explicit,
    /// Writing to row R flushes every buffered row below R
    #[default]
    OnNewRow,
}

/// Settings for a constant-memory worksheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingPolicy {
    pub flush: FlushPolicy,
    /// Directory for the spool file, the system temp dir when `None`
    pub temp_dir: Option<PathBuf>,
}

impl StreamingPolicy {
    pub fn explicit() -> Self {
        Self {
            flush: FlushPolicy::Explicit,
            temp_dir: None,
        }
    }

    pub fn on_new_row() -> Self {
        Self::default()
    }

    pub fn with_temp_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }
}

/// In-memory spool for unit tests
///
/// With `failing_after(n)` the spool accepts `n` rows and rejects the rest.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemorySpool {
    rows: Vec<(u32, Row)>,
    capacity: Option<usize>,
}

#[cfg(test)]
impl MemorySpool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_after(capacity: usize) -> Self {
        Self {
            rows: Vec::new(),
            capacity: Some(capacity),
        }
    }
}

#[cfg(test)]
impl RowSpool for MemorySpool {
    fn write_row(&mut self, index: u32, row: &Row) -> Result<()> {
        if self.capacity.map_or(false, |cap| self.rows.len() >= cap) {
            return Err(crate::Error::TmpFileIo(io::Error::new(
                io::ErrorKind::Other,
                "no space left on spool",
            )));
        }
        self.rows.push((index, row.clone()));
        Ok(())
    }

    fn copy_to(&mut self, out: &mut dyn Write) -> io::Result<u64> {
        let mut written = 0;
        for (index, _) in &self.rows {
            let line = format!("{}\n", index);
            out.write_all(line.as_bytes())?;
            written += line.len() as u64;
        }
        Ok(written)
    }

    fn rows_written(&self) -> u64 {
        self.rows.len() as u64
    }
}
