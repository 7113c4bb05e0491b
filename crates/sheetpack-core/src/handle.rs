//! Write handle for one worksheet
//!
//! [`WorksheetMut`] borrows a worksheet together with the workbook's string
//! and format tables. Every write validates position, ordering, locks and
//! value limits first, so a failed call leaves the sheet and both tables
//! untouched.

use crate::cell::{Cell, CellError, CellRange, CellValue, FormulaResult};
use crate::datetime::ExcelDateTime;
use crate::error::{Error, Result};
use crate::format::{Format, FormatIndex, FormatTable, NumberFormat};
use crate::grid::RowOptions;
use crate::hyperlink::Hyperlink;
use crate::strings::StringTable;
use crate::worksheet::{ColumnOptions, Worksheet};
use crate::MAX_STRING_LEN;

/// Mutable access to one worksheet of a [`Workbook`](crate::Workbook)
#[derive(Debug)]
pub struct WorksheetMut<'a> {
    sheet: &'a mut Worksheet,
    strings: &'a mut StringTable,
    formats: &'a mut FormatTable,
    date_1904: bool,
}

impl<'a> WorksheetMut<'a> {
    pub(crate) fn new(
        sheet: &'a mut Worksheet,
        strings: &'a mut StringTable,
        formats: &'a mut FormatTable,
        date_1904: bool,
    ) -> Self {
        Self {
            sheet,
            strings,
            formats,
            date_1904,
        }
    }

    /// The worksheet being written
    pub fn sheet(&self) -> &Worksheet {
        self.sheet
    }

    pub fn name(&self) -> &str {
        self.sheet.name()
    }

    /// Write a number
    ///
    /// NaN and infinities have no representation in a worksheet and are
    /// rejected.
    ///
    /// ```
    /// use sheetpack_core::Workbook;
    ///
    /// let mut wb = Workbook::new();
    /// let idx = wb.add_worksheet().unwrap();
    /// let mut sheet = wb.worksheet_mut(idx).unwrap();
    /// sheet.write_number(0, 0, 42.0, None).unwrap();
    /// assert!(sheet.write_number(0, 1, f64::NAN, None).is_err());
    /// ```
    pub fn write_number(&mut self, row: u32, col: u16, value: f64, format: Option<&Format>) -> Result<()> {
        check_finite(value)?;
        self.sheet.check_writable(row, col)?;
        let format = self.register(format)?;
        self.sheet
            .insert_cell(row, col, Cell::with_format(CellValue::Number(value), format))
    }

    /// Write a string through the shared string table
    ///
    /// An empty string is written as a blank cell, see [`write_blank`](Self::write_blank).
    pub fn write_string(&mut self, row: u32, col: u16, value: &str, format: Option<&Format>) -> Result<()> {
        if value.is_empty() {
            return self.write_blank(row, col, format);
        }
        self.sheet.check_writable(row, col)?;
        check_format(format)?;
        let index = self.strings.intern(value)?;
        let format = self.register(format)?;
        self.sheet.insert_cell(
            row,
            col,
            Cell::with_format(CellValue::SharedString(index), format),
        )
    }

    /// Write text inline in the worksheet instead of the shared table
    pub fn write_inline_string(
        &mut self,
        row: u32,
        col: u16,
        value: &str,
        format: Option<&Format>,
    ) -> Result<()> {
        check_string_len(value)?;
        self.sheet.check_writable(row, col)?;
        let format = self.register(format)?;
        self.sheet.insert_cell(
            row,
            col,
            Cell::with_format(CellValue::InlineString(value.to_string()), format),
        )
    }

    /// Write a formula; a leading `=` is stripped
    pub fn write_formula(&mut self, row: u32, col: u16, formula: &str, format: Option<&Format>) -> Result<()> {
        self.write_formula_cell(row, col, formula, None, format)
    }

    /// Write a formula together with the value readers show before recalculating
    pub fn write_formula_with_result<R: Into<FormulaResult>>(
        &mut self,
        row: u32,
        col: u16,
        formula: &str,
        result: R,
        format: Option<&Format>,
    ) -> Result<()> {
        self.write_formula_cell(row, col, formula, Some(result.into()), format)
    }

    fn write_formula_cell(
        &mut self,
        row: u32,
        col: u16,
        formula: &str,
        result: Option<FormulaResult>,
        format: Option<&Format>,
    ) -> Result<()> {
        let text = crate::cell::strip_formula_prefix(formula);
        if text.is_empty() {
            return Err(Error::ParameterIsEmpty("formula"));
        }
        check_result(result.as_ref())?;
        self.sheet.check_writable(row, col)?;
        let format = self.register(format)?;
        self.sheet.insert_cell(
            row,
            col,
            Cell::with_format(
                CellValue::Formula {
                    text: text.to_string(),
                    result,
                },
                format,
            ),
        )
    }

    /// Write an array formula over a range
    ///
    /// The formula lives in the top-left cell; the other cells of the range
    /// hold a placeholder 0 and reject later writes.
    pub fn write_array_formula(
        &mut self,
        first_row: u32,
        first_col: u16,
        last_row: u32,
        last_col: u16,
        formula: &str,
        format: Option<&Format>,
    ) -> Result<()> {
        let text = crate::cell::strip_formula_prefix(formula.trim());
        let text = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(text);
        let text = crate::cell::strip_formula_prefix(text);
        if text.is_empty() {
            return Err(Error::ParameterIsEmpty("formula"));
        }

        let range = CellRange::checked(first_row, first_col, last_row, last_col)?;
        self.sheet.check_range_free(&range)?;
        for r in range.start.row..=range.end.row {
            for c in range.start.col..=range.end.col {
                self.sheet.check_writable(r, c)?;
            }
        }

        let format = self.register(format)?;
        for r in range.start.row..=range.end.row {
            for c in range.start.col..=range.end.col {
                let value = if (r, c) == (range.start.row, range.start.col) {
                    CellValue::ArrayFormula {
                        text: text.to_string(),
                        range,
                        result: None,
                    }
                } else {
                    CellValue::Number(0.0)
                };
                self.sheet.insert_cell(r, c, Cell::with_format(value, format))?;
            }
        }
        self.sheet.add_array_range(range);
        Ok(())
    }

    pub fn write_boolean(&mut self, row: u32, col: u16, value: bool, format: Option<&Format>) -> Result<()> {
        self.sheet.check_writable(row, col)?;
        let format = self.register(format)?;
        self.sheet
            .insert_cell(row, col, Cell::with_format(CellValue::Boolean(value), format))
    }

    pub fn write_error(&mut self, row: u32, col: u16, value: CellError, format: Option<&Format>) -> Result<()> {
        self.sheet.check_writable(row, col)?;
        let format = self.register(format)?;
        self.sheet
            .insert_cell(row, col, Cell::with_format(CellValue::Error(value), format))
    }

    /// Write a formatted empty cell
    ///
    /// A blank cell without a format carries no information and is skipped.
    pub fn write_blank(&mut self, row: u32, col: u16, format: Option<&Format>) -> Result<()> {
        self.sheet.check_writable(row, col)?;
        if format.is_none() {
            return Ok(());
        }
        let format = self.register(format)?;
        self.sheet
            .insert_cell(row, col, Cell::with_format(CellValue::Blank, format))
    }

    /// Write a date/time as a serial number
    ///
    /// Without a format the cell gets a built-in date (`m/d/yy`), time
    /// (`h:mm:ss`) or date-time (`m/d/yy h:mm`) number format.
    pub fn write_datetime(
        &mut self,
        row: u32,
        col: u16,
        value: &ExcelDateTime,
        format: Option<&Format>,
    ) -> Result<()> {
        let serial = value.to_serial(self.date_1904)?;
        self.sheet.check_writable(row, col)?;

        let index = match format {
            Some(f) => {
                f.validate()?;
                self.formats.register(f)
            }
            None => {
                let id = match (value.date(), serial.fract() == 0.0) {
                    (None, _) => 21,
                    (Some(_), true) => NumberFormat::ID_DATE_SHORT,
                    (Some(_), false) => NumberFormat::ID_DATETIME,
                };
                self.formats.register(&Format::new().number_format_id(id))
            }
        };
        self.sheet.insert_cell(
            row,
            col,
            Cell::with_format(CellValue::Number(serial), Some(index)),
        )
    }

    /// Write a hyperlink showing the url itself
    pub fn write_url(&mut self, row: u32, col: u16, url: &str, format: Option<&Format>) -> Result<()> {
        let link = Hyperlink::parse(url)?;
        self.write_hyperlink(row, col, link, format)
    }

    /// Write a hyperlink with display text and an optional tooltip
    pub fn write_url_with_text(
        &mut self,
        row: u32,
        col: u16,
        url: &str,
        text: &str,
        tooltip: Option<&str>,
        format: Option<&Format>,
    ) -> Result<()> {
        let mut link = Hyperlink::parse(url)?.with_display(text);
        if let Some(tooltip) = tooltip {
            link = link.with_tooltip(tooltip)?;
        }
        self.write_hyperlink(row, col, link, format)
    }

    fn write_hyperlink(&mut self, row: u32, col: u16, link: Hyperlink, format: Option<&Format>) -> Result<()> {
        self.sheet.check_writable(row, col)?;
        self.sheet.check_hyperlink_capacity(row, col)?;
        check_format(format)?;
        let index = self.strings.intern(&link.display)?;

        let format = match format {
            Some(f) => self.formats.register(f),
            None => self.formats.register(&Format::hyperlink()),
        };
        self.sheet.insert_cell(
            row,
            col,
            Cell::with_format(CellValue::SharedString(index), Some(format)),
        )?;
        self.sheet.add_hyperlink(row, col, link)
    }

    /// Merge a range and write `value` into its top-left cell
    ///
    /// The other cells of the range are written as formatted blanks so
    /// borders and fills cover the whole merged area.
    pub fn merge_range(
        &mut self,
        first_row: u32,
        first_col: u16,
        last_row: u32,
        last_col: u16,
        value: &str,
        format: Option<&Format>,
    ) -> Result<()> {
        let range = CellRange::checked(first_row, first_col, last_row, last_col)?;
        if range.is_single_cell() {
            return Err(Error::ParameterValidation(format!(
                "merged range {} must span more than one cell",
                range
            )));
        }
        self.sheet.check_range_free(&range)?;
        for r in range.start.row..=range.end.row {
            for c in range.start.col..=range.end.col {
                self.sheet.check_writable(r, c)?;
            }
        }

        check_format(format)?;
        let index = self.strings.intern(value)?;
        let format = self.register(format)?;
        for r in range.start.row..=range.end.row {
            for c in range.start.col..=range.end.col {
                let value = if (r, c) == (range.start.row, range.start.col) {
                    CellValue::SharedString(index)
                } else {
                    CellValue::Blank
                };
                self.sheet.insert_cell(r, c, Cell::with_format(value, format))?;
            }
        }
        self.sheet.add_merged_range(range);
        Ok(())
    }

    /// Set the height (in points) and format of a row
    pub fn set_row(&mut self, row: u32, height: Option<f64>, format: Option<&Format>) -> Result<()> {
        self.set_row_options(row, height, false, format)
    }

    /// Set row height, visibility and format
    pub fn set_row_options(
        &mut self,
        row: u32,
        height: Option<f64>,
        hidden: bool,
        format: Option<&Format>,
    ) -> Result<()> {
        if let Some(h) = height {
            check_dimension(h, 409.0, "row height")?;
        }
        crate::cell::check_bounds(row, 0)?;
        check_format(format)?;
        // a flushed row ignores its options, so nothing gets registered for it
        let format = if self.sheet.is_row_flushed(row) {
            None
        } else {
            self.register(format)?
        };
        self.sheet.set_row_options(
            row,
            RowOptions {
                height,
                hidden,
                format,
            },
        )
    }

    /// Set the width (in characters) and format of a column range
    pub fn set_column(
        &mut self,
        first_col: u16,
        last_col: u16,
        width: Option<f64>,
        format: Option<&Format>,
    ) -> Result<()> {
        self.set_column_options(first_col, last_col, width, false, format)
    }

    /// Set width, visibility and format of a column range
    pub fn set_column_options(
        &mut self,
        first_col: u16,
        last_col: u16,
        width: Option<f64>,
        hidden: bool,
        format: Option<&Format>,
    ) -> Result<()> {
        if let Some(w) = width {
            check_dimension(w, 255.0, "column width")?;
        }
        crate::cell::check_bounds(0, first_col.max(last_col))?;
        let format = self.register(format)?;
        self.sheet.set_column_options(
            first_col,
            last_col,
            ColumnOptions {
                width,
                hidden,
                format,
            },
        )
    }

    /// Flush rows of a constant-memory worksheet, see
    /// [`Worksheet::flush_through`]
    pub fn flush_through(&mut self, row: u32) -> Result<()> {
        self.sheet.flush_through(row)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.sheet.set_hidden(hidden);
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.sheet.set_selected(selected);
    }

    /// Register a format, mapping the default to "no format"
    fn register(&mut self, format: Option<&Format>) -> Result<Option<FormatIndex>> {
        let Some(format) = format else {
            return Ok(None);
        };
        format.validate()?;
        let index = self.formats.register(format);
        Ok((index != FormatIndex::DEFAULT).then_some(index))
    }
}

fn check_format(format: Option<&Format>) -> Result<()> {
    match format {
        Some(f) => f.validate(),
        None => Ok(()),
    }
}

fn check_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::ParameterValidation(format!(
            "{} cannot be stored in a worksheet",
            value
        )))
    }
}

fn check_string_len(value: &str) -> Result<()> {
    if value.len() > MAX_STRING_LEN && value.chars().count() > MAX_STRING_LEN {
        return Err(Error::MaxStringLengthExceeded);
    }
    Ok(())
}

fn check_result(result: Option<&FormulaResult>) -> Result<()> {
    match result {
        Some(FormulaResult::Number(n)) => check_finite(*n),
        Some(FormulaResult::String(s)) => check_string_len(s),
        _ => Ok(()),
    }
}

fn check_dimension(value: f64, max: f64, field: &str) -> Result<()> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::ParameterValidation(format!(
            "{} {} outside 0..={}",
            field, value, max
        )))
    }
}
