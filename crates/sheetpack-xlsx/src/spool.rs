//! Temp-file row spool for constant-memory worksheets

use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use sheetpack_core::{Error, Result, Row, RowSpool, StreamingPolicy, Workbook};

use crate::parts::worksheet::render_row;

/// Spools rendered `<row>` elements to an anonymous temp file
///
/// The file is unlinked on creation and disappears when the spool is
/// dropped, whether or not the workbook was ever saved.
#[derive(Debug)]
pub struct TempFileSpool {
    file: BufWriter<File>,
    rows: u64,
    buf: String,
    // set when a write failed midway; the file may end in a partial row
    broken: bool,
}

impl TempFileSpool {
    /// Create a spool in the system temp directory
    pub fn new() -> Result<Self> {
        let file = tempfile::tempfile().map_err(Error::CreatingTmpFile)?;
        Ok(Self::from_file(file))
    }

    /// Create a spool in `dir`
    pub fn new_in<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let file = tempfile::tempfile_in(dir).map_err(Error::CreatingTmpFile)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: File) -> Self {
        Self {
            file: BufWriter::with_capacity(64 * 1024, file),
            rows: 0,
            buf: String::with_capacity(4096),
            broken: false,
        }
    }
}

impl RowSpool for TempFileSpool {
    fn write_row(&mut self, index: u32, row: &Row) -> Result<()> {
        if self.broken {
            return Err(Error::TmpFileIo(broken_spool()));
        }
        self.buf.clear();
        render_row(&mut self.buf, index, row);
        if let Err(e) = self.file.write_all(self.buf.as_bytes()) {
            self.broken = true;
            return Err(Error::TmpFileIo(e));
        }
        self.rows += 1;
        Ok(())
    }

    fn copy_to(&mut self, out: &mut dyn Write) -> io::Result<u64> {
        if self.broken {
            return Err(broken_spool());
        }
        self.file.flush()?;
        let file = self.file.get_mut();
        file.seek(SeekFrom::Start(0))?;
        let copied = io::copy(&mut *file, out)?;
        file.seek(SeekFrom::End(0))?;
        Ok(copied)
    }

    fn rows_written(&self) -> u64 {
        self.rows
    }
}

fn broken_spool() -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        "row spool is unusable after an earlier write error",
    )
}

/// Adds temp-file backed constant-memory worksheets to a [`Workbook`]
pub trait ConstantMemoryExt {
    /// Add a worksheet whose rows are flushed to a temp file as the sheet
    /// advances; returns the sheet index
    fn add_constant_memory_worksheet(
        &mut self,
        name: Option<&str>,
        policy: StreamingPolicy,
    ) -> Result<usize>;
}

impl ConstantMemoryExt for Workbook {
    fn add_constant_memory_worksheet(
        &mut self,
        name: Option<&str>,
        policy: StreamingPolicy,
    ) -> Result<usize> {
        let spool = match &policy.temp_dir {
            Some(dir) => TempFileSpool::new_in(dir)?,
            None => TempFileSpool::new()?,
        };
        let idx = self.add_streaming_worksheet(name, policy.flush, Box::new(spool))?;
        log::debug!("Added constant-memory worksheet {} ({:?})", idx, policy.flush);
        Ok(idx)
    }
}
