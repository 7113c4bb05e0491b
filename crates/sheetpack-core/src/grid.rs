//! Sparse cell grid
//!
//! Only populated cells are stored, using a row-based BTreeMap structure:
//! `BTreeMap<row, Row>` where each row holds a `BTreeMap<col, Cell>`.
//! Iteration is therefore always ascending by row, then by column, which is
//! the order `<sheetData>` must be written in.

use std::collections::BTreeMap;

use crate::cell::{check_bounds, Cell, CellRange};
use crate::error::Result;
use crate::format::FormatIndex;

/// Per-row settings written as attributes of `<row>`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RowOptions {
    /// Height in points, `None` for the default height
    pub height: Option<f64>,
    pub hidden: bool,
    /// Format applied to empty cells of the row
    pub format: Option<FormatIndex>,
}

impl RowOptions {
    pub fn is_default(&self) -> bool {
        self.height.is_none() && !self.hidden && self.format.is_none()
    }
}

/// One row of the grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<u16, Cell>,
    options: RowOptions,
}

impl Row {
    /// Cells in ascending column order
    pub fn cells(&self) -> impl Iterator<Item = (u16, &Cell)> {
        self.cells.iter().map(|(&c, cell)| (c, cell))
    }

    pub fn get(&self, col: u16) -> Option<&Cell> {
        self.cells.get(&col)
    }

    pub fn options(&self) -> &RowOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RowOptions) {
        self.options = options;
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First and last populated column
    pub fn span(&self) -> Option<(u16, u16)> {
        let first = *self.cells.keys().next()?;
        let last = *self.cells.keys().next_back()?;
        Some((first, last))
    }

    /// Insert a cell, returning the previous one at that column
    pub fn insert(&mut self, col: u16, cell: Cell) -> Option<Cell> {
        self.cells.insert(col, cell)
    }
}

/// Minimal bounding rectangle of all populated cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl Dimension {
    /// Dimension covering a single cell
    pub fn cell(row: u32, col: u16) -> Self {
        Self {
            first_row: row,
            first_col: col,
            last_row: row,
            last_col: col,
        }
    }

    /// Grow to include (row, col)
    pub fn extend(&mut self, row: u32, col: u16) {
        self.first_row = self.first_row.min(row);
        self.first_col = self.first_col.min(col);
        self.last_row = self.last_row.max(row);
        self.last_col = self.last_col.max(col);
    }

    pub fn to_range(&self) -> CellRange {
        CellRange::from_indices(self.first_row, self.first_col, self.last_row, self.last_col)
    }
}

/// Ordered sparse storage for one worksheet
#[derive(Debug, Default)]
pub struct CellGrid {
    rows: BTreeMap<u32, Row>,
    cell_count: usize,
}

impl CellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cell, replacing any previous value at the same position
    ///
    /// Out-of-range positions fail with `IndexOutOfRange` and leave the grid
    /// unchanged.
    pub fn set_cell(&mut self, row: u32, col: u16, cell: Cell) -> Result<()> {
        check_bounds(row, col)?;
        if self.rows.entry(row).or_default().insert(col, cell).is_none() {
            self.cell_count += 1;
        }
        Ok(())
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row)?.get(col)
    }

    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.get(&index)
    }

    /// Get a row for modification, creating it on first use
    pub fn row_mut_or_insert(&mut self, index: u32) -> Result<&mut Row> {
        check_bounds(index, 0)?;
        Ok(self.rows.entry(index).or_default())
    }

    /// Rows in ascending order
    pub fn rows_in_order(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.rows.iter().map(|(&r, row)| (r, row))
    }

    /// Bounding rectangle of the cells currently held
    pub fn dimension(&self) -> Option<Dimension> {
        let mut dim: Option<Dimension> = None;
        for (&r, row) in &self.rows {
            if let Some((first, last)) = row.span() {
                match dim.as_mut() {
                    Some(d) => {
                        d.extend(r, first);
                        d.extend(r, last);
                    }
                    None => {
                        let mut d = Dimension::cell(r, first);
                        d.extend(r, last);
                        dim = Some(d);
                    }
                }
            }
        }
        dim
    }

    /// Remove and return every row with index <= `through`, in order
    pub fn drain_through(&mut self, through: u32) -> BTreeMap<u32, Row> {
        let kept = match through.checked_add(1) {
            Some(split) => self.rows.split_off(&split),
            None => BTreeMap::new(),
        };
        let drained = std::mem::replace(&mut self.rows, kept);
        self.cell_count -= drained.values().map(|r| r.cells.len()).sum::<usize>();
        drained
    }

    /// Remove one row and the cells it holds
    pub fn remove_row(&mut self, index: u32) -> Option<Row> {
        let row = self.rows.remove(&index)?;
        self.cell_count -= row.cells.len();
        Some(row)
    }

    /// Number of populated cells
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Number of rows held, including rows with only options
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
