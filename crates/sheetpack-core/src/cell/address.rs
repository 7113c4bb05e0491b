//! Cell address and range types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1")
///
/// Rows and columns are 0-based internally and rendered 1-based with column
/// letters (A-XFD) in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Create a cell address, rejecting positions outside the grid
    pub fn checked(row: u32, col: u16) -> Result<Self> {
        check_bounds(row, col)?;
        Ok(Self { row, col })
    }

    /// Parse a cell address from A1-style notation
    ///
    /// `$` markers are accepted and ignored.
    ///
    /// # Examples
    /// ```
    /// use sheetpack_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3").unwrap();
    /// assert_eq!(addr.row, 2);
    /// assert_eq!(addr.col, 1);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }
        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(invalid_address(s));
        }
        let col = Self::letters_to_column(&s[col_start..pos])?;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }
        let row: u32 = s[pos..].parse().map_err(|_| invalid_address(s))?;
        if row == 0 {
            return Err(invalid_address(s));
        }

        Self::checked(row - 1, col)
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut out = String::with_capacity(3);
        push_column_letters(&mut out, col);
        out
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() || letters.len() > 3 {
            return Err(invalid_address(letters));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(invalid_address(letters));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }
        let col = col - 1;

        if col >= MAX_COLS as u32 {
            return Err(Error::IndexOutOfRange { row: 0, col });
        }
        Ok(col as u16)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        let mut out = String::with_capacity(10);
        push_cell_ref(&mut out, self.row, self.col);
        out
    }

    /// Format as an absolute reference (`$A$1`)
    pub fn to_absolute_string(&self) -> String {
        let mut out = String::with_capacity(12);
        out.push('$');
        push_column_letters(&mut out, self.col);
        out.push('$');
        out.push_str(itoa_u32(self.row + 1).as_str());
        out
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalizing corners to top-left/bottom-right
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range from row/column indices
    pub fn from_indices(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self::new(
            CellAddress::new(first_row, first_col),
            CellAddress::new(last_row, last_col),
        )
    }

    /// Create a range from indices, rejecting corners outside the grid
    pub fn checked(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Result<Self> {
        check_bounds(first_row, first_col)?;
        check_bounds(last_row, last_col)?;
        Ok(Self::from_indices(first_row, first_col, last_row, last_col))
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((a, b)) => Ok(Self::new(CellAddress::parse(a)?, CellAddress::parse(b)?)),
            None => {
                let addr = CellAddress::parse(s)?;
                Ok(Self::new(addr, addr))
            }
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, row: u32, col: u16) -> bool {
        row >= self.start.row && row <= self.end.row && col >= self.start.col && col <= self.end.col
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// True for a range covering exactly one cell
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Top-left cell of the range
    pub fn anchor(&self) -> CellAddress {
        self.start
    }

    /// Format as A1:B10 string (single cells render as "A1")
    pub fn to_a1_string(&self) -> String {
        let mut out = String::with_capacity(20);
        push_range_ref(&mut out, self);
        out
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Validate a (row, col) pair against the worksheet grid.
pub fn check_bounds(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(Error::IndexOutOfRange {
            row,
            col: col as u32,
        });
    }
    Ok(())
}

/// Append the column letters for `col` to `out` without allocating.
pub fn push_column_letters(out: &mut String, col: u16) {
    let mut buf = [0u8; 3];
    let mut len = 0;
    let mut n = col as u32 + 1;
    while n > 0 {
        n -= 1;
        buf[len] = b'A' + (n % 26) as u8;
        len += 1;
        n /= 26;
    }
    for &b in buf[..len].iter().rev() {
        out.push(b as char);
    }
}

/// Append an A1 reference for (row, col) to `out`.
pub fn push_cell_ref(out: &mut String, row: u32, col: u16) {
    push_column_letters(out, col);
    out.push_str(itoa_u32(row + 1).as_str());
}

/// Append an A1 range reference to `out`; single cells are written as "A1".
pub fn push_range_ref(out: &mut String, range: &CellRange) {
    push_cell_ref(out, range.start.row, range.start.col);
    if !range.is_single_cell() {
        out.push(':');
        push_cell_ref(out, range.end.row, range.end.col);
    }
}

struct RowDigits {
    buf: [u8; 10],
    start: usize,
}

impl RowDigits {
    fn as_str(&self) -> &str {
        // Only ASCII digits are ever written into `buf`.
        std::str::from_utf8(&self.buf[self.start..]).unwrap_or("0")
    }
}

fn itoa_u32(mut n: u32) -> RowDigits {
    let mut buf = [b'0'; 10];
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    RowDigits { buf, start }
}

fn invalid_address(s: &str) -> Error {
    Error::ParameterValidation(format!("invalid cell address '{}'", s))
}
