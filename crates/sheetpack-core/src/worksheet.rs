//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{check_bounds, Cell, CellRange};
use crate::error::{Error, Result};
use crate::format::FormatIndex;
use crate::grid::{CellGrid, Dimension, Row, RowOptions};
use crate::hyperlink::Hyperlink;
use crate::spool::{FlushPolicy, RowSpool};
use crate::{MAX_ROWS, MAX_URLS_PER_SHEET};

/// Column settings written to `<cols>`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnOptions {
    /// Width in characters, `None` for the default width
    pub width: Option<f64>,
    pub hidden: bool,
    pub format: Option<FormatIndex>,
}

/// Constant-memory state of a worksheet
#[derive(Debug)]
struct Streaming {
    policy: FlushPolicy,
    /// Highest row already handed to the spool
    flushed_through: Option<u32>,
    spool: Box<dyn RowSpool>,
}

/// A worksheet (single sheet in a workbook)
///
/// Cells are written through [`WorksheetMut`](crate::WorksheetMut), which
/// borrows the workbook's string and format tables alongside the sheet.
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    grid: CellGrid,
    /// Tracked on every write so it survives row eviction
    dimension: Option<Dimension>,
    streaming: Option<Streaming>,
    merged_ranges: Vec<CellRange>,
    array_ranges: Vec<CellRange>,
    hyperlinks: BTreeMap<(u32, u16), Hyperlink>,
    columns: BTreeMap<u16, ColumnOptions>,
    hidden: bool,
    selected: bool,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            grid: CellGrid::new(),
            dimension: None,
            streaming: None,
            merged_ranges: Vec::new(),
            array_ranges: Vec::new(),
            hyperlinks: BTreeMap::new(),
            columns: BTreeMap::new(),
            hidden: false,
            selected: false,
        }
    }

    /// Create a worksheet whose rows are flushed to `spool`
    pub(crate) fn new_streaming<S: Into<String>>(
        name: S,
        policy: FlushPolicy,
        spool: Box<dyn RowSpool>,
    ) -> Self {
        let mut sheet = Self::new(name);
        sheet.streaming = Some(Streaming {
            policy,
            flushed_through: None,
            spool,
        });
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Used range of every cell ever written, flushed rows included
    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.grid.get(row, col)
    }

    pub fn merged_ranges(&self) -> &[CellRange] {
        &self.merged_ranges
    }

    pub fn array_ranges(&self) -> &[CellRange] {
        &self.array_ranges
    }

    /// Hyperlinks in row-major order
    pub fn hyperlinks(&self) -> impl Iterator<Item = ((u32, u16), &Hyperlink)> {
        self.hyperlinks.iter().map(|(&pos, link)| (pos, link))
    }

    pub fn hyperlink_count(&self) -> usize {
        self.hyperlinks.len()
    }

    /// Column settings keyed by column index
    pub fn columns(&self) -> &BTreeMap<u16, ColumnOptions> {
        &self.columns
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.is_some()
    }

    /// Highest flushed row of a constant-memory worksheet
    pub fn flushed_through(&self) -> Option<u32> {
        self.streaming.as_ref().and_then(|s| s.flushed_through)
    }

    /// Spool of a constant-memory worksheet
    pub fn spool_mut(&mut self) -> Option<&mut dyn RowSpool> {
        match self.streaming.as_mut() {
            Some(s) => Some(s.spool.as_mut()),
            None => None,
        }
    }

    /// Serialize and evict every buffered row with index <= `row`
    ///
    /// Later writes to any row <= `row` fail with `RowAlreadyFlushed`. A row
    /// leaves memory only once the spool accepted it; if the spool fails,
    /// the rows it did not take stay buffered and writable.
    pub fn flush_through(&mut self, row: u32) -> Result<()> {
        let streaming = self.streaming.as_mut().ok_or(Error::FeatureNotSupported(
            "flushing rows requires a constant-memory worksheet",
        ))?;

        let mut flushed = 0usize;
        loop {
            let index = match self.grid.rows_in_order().next() {
                Some((index, _)) if index <= row => index,
                _ => break,
            };
            if let Some(data) = self.grid.row(index) {
                streaming.spool.write_row(index, data)?;
            }
            self.grid.remove_row(index);
            streaming.flushed_through =
                Some(streaming.flushed_through.map_or(index, |prev| prev.max(index)));
            flushed += 1;
        }
        if flushed > 0 {
            log::debug!(
                "Flushed {} rows of '{}' through row {}",
                flushed,
                self.name,
                row
            );
        }

        let through = row.min(MAX_ROWS - 1);
        streaming.flushed_through = Some(match streaming.flushed_through {
            Some(prev) => prev.max(through),
            None => through,
        });
        Ok(())
    }

    /// Flush every remaining row; no-op for in-memory worksheets
    pub fn flush_all(&mut self) -> Result<()> {
        if self.streaming.is_some() {
            self.flush_through(MAX_ROWS - 1)?;
        }
        Ok(())
    }

    /// Check that (row, col) can be written without touching the sheet
    pub(crate) fn check_writable(&self, row: u32, col: u16) -> Result<()> {
        check_bounds(row, col)?;
        self.check_open(row)?;

        let locked = self
            .merged_ranges
            .iter()
            .any(|r| r.contains(row, col) && !(r.start.row == row && r.start.col == col))
            || self.array_ranges.iter().any(|r| r.contains(row, col));
        if locked {
            return Err(Error::CellLocked(
                crate::cell::CellAddress::new(row, col).to_a1_string(),
            ));
        }
        Ok(())
    }

    /// Check that `range` can be claimed by a merge or an array formula
    pub(crate) fn check_range_free(&self, range: &CellRange) -> Result<()> {
        check_bounds(range.start.row, range.start.col)?;
        check_bounds(range.end.row, range.end.col)?;
        self.check_open(range.start.row)?;

        if self
            .merged_ranges
            .iter()
            .chain(self.array_ranges.iter())
            .any(|r| r.overlaps(range))
        {
            return Err(Error::RangeOverlap(range.to_a1_string()));
        }
        Ok(())
    }

    pub(crate) fn is_row_flushed(&self, row: u32) -> bool {
        self.flushed_through().map_or(false, |through| row <= through)
    }

    fn check_open(&self, row: u32) -> Result<()> {
        if let Some(flushed_through) = self.flushed_through() {
            if row <= flushed_through {
                return Err(Error::RowAlreadyFlushed {
                    row,
                    flushed_through,
                });
            }
        }
        Ok(())
    }

    /// Under `OnNewRow`, touching row R flushes every row below it
    fn advance_to(&mut self, row: u32) -> Result<()> {
        let on_new_row = matches!(
            self.streaming,
            Some(Streaming {
                policy: FlushPolicy::OnNewRow,
                ..
            })
        );
        if on_new_row && row > 0 {
            let has_older = self.grid.rows_in_order().next().map_or(false, |(r, _)| r < row);
            if has_older {
                self.flush_through(row - 1)?;
            }
        }
        Ok(())
    }

    /// Store a cell that already passed `check_writable`
    pub(crate) fn insert_cell(&mut self, row: u32, col: u16, cell: Cell) -> Result<()> {
        self.advance_to(row)?;
        self.grid.set_cell(row, col, cell)?;
        match self.dimension.as_mut() {
            Some(dim) => dim.extend(row, col),
            None => self.dimension = Some(Dimension::cell(row, col)),
        }
        Ok(())
    }

    pub(crate) fn add_merged_range(&mut self, range: CellRange) {
        self.merged_ranges.push(range);
    }

    pub(crate) fn add_array_range(&mut self, range: CellRange) {
        self.array_ranges.push(range);
    }

    pub(crate) fn add_hyperlink(&mut self, row: u32, col: u16, link: Hyperlink) -> Result<()> {
        self.check_hyperlink_capacity(row, col)?;
        self.hyperlinks.insert((row, col), link);
        Ok(())
    }

    /// Check the url limit before any cell is written for a new link
    pub(crate) fn check_hyperlink_capacity(&self, row: u32, col: u16) -> Result<()> {
        if self.hyperlinks.len() >= MAX_URLS_PER_SHEET && !self.hyperlinks.contains_key(&(row, col))
        {
            return Err(Error::MaxNumberUrlsExceeded);
        }
        Ok(())
    }

    /// Apply row settings; flushed rows are left alone with a warning
    pub(crate) fn set_row_options(&mut self, row: u32, options: RowOptions) -> Result<()> {
        check_bounds(row, 0)?;
        if self.is_row_flushed(row) {
            log::warn!(
                "Ignoring options for row {} of '{}': row already flushed",
                row,
                self.name
            );
            return Ok(());
        }
        self.advance_to(row)?;
        self.grid.row_mut_or_insert(row)?.set_options(options);
        Ok(())
    }

    pub(crate) fn set_column_options(&mut self, first: u16, last: u16, options: ColumnOptions) -> Result<()> {
        let (first, last) = (first.min(last), first.max(last));
        check_bounds(0, last)?;
        for col in first..=last {
            self.columns.insert(col, options);
        }
        Ok(())
    }

    /// Rows still buffered in memory
    pub fn buffered_rows(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.grid.rows_in_order()
    }
}
