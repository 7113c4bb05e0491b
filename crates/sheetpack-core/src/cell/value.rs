//! Cell value types

use std::fmt;

use super::CellRange;
use crate::format::FormatIndex;
use crate::strings::StringIndex;

/// Represents the value stored in a cell
///
/// String content never lives in the cell itself: ordinary strings are
/// interned in the workbook's string table and the cell keeps the index.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Numeric value (all numbers stored as f64, including dates)
    Number(f64),

    /// Index into the workbook's shared string table
    SharedString(StringIndex),

    /// Text written inline in the worksheet (`t="inlineStr"`)
    InlineString(String),

    /// Formula with an optional cached result
    Formula {
        /// Formula text without the leading `=`
        text: String,
        /// Value shown by readers that do not recalculate
        result: Option<FormulaResult>,
    },

    /// Array formula anchored at the top-left cell of `range`
    ArrayFormula {
        /// Formula text without the leading `=` or braces
        text: String,
        /// Cells covered by the array
        range: CellRange,
        /// Cached result for the anchor cell
        result: Option<FormulaResult>,
    },

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Error value (#VALUE!, #REF!, etc.)
    Error(CellError),

    /// Cell with a format but no value
    Blank,
}

impl CellValue {
    /// Build a formula value, stripping a leading `=`
    pub fn formula<S: AsRef<str>>(text: S) -> Self {
        CellValue::Formula {
            text: strip_formula_prefix(text.as_ref()).to_string(),
            result: None,
        }
    }

    /// Check if the cell contains a formula (plain or array)
    pub fn is_formula(&self) -> bool {
        matches!(
            self,
            CellValue::Formula { .. } | CellValue::ArrayFormula { .. }
        )
    }

    /// Check if the cell is blank
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the formula text if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula { text, .. } | CellValue::ArrayFormula { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Number(_) => "number",
            CellValue::SharedString(_) => "string",
            CellValue::InlineString(_) => "inline_string",
            CellValue::Formula { .. } => "formula",
            CellValue::ArrayFormula { .. } => "array_formula",
            CellValue::Boolean(_) => "boolean",
            CellValue::Error(_) => "error",
            CellValue::Blank => "blank",
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Blank
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<CellError> for CellValue {
    fn from(e: CellError) -> Self {
        CellValue::Error(e)
    }
}

impl From<StringIndex> for CellValue {
    fn from(index: StringIndex) -> Self {
        CellValue::SharedString(index)
    }
}

/// Cached result stored alongside a formula
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaResult {
    Number(f64),
    String(String),
    Boolean(bool),
    Error(CellError),
}

impl From<f64> for FormulaResult {
    fn from(n: f64) -> Self {
        FormulaResult::Number(n)
    }
}

impl From<&str> for FormulaResult {
    fn from(s: &str) -> Self {
        FormulaResult::String(s.to_string())
    }
}

impl From<String> for FormulaResult {
    fn from(s: String) -> Self {
        FormulaResult::String(s)
    }
}

impl From<bool> for FormulaResult {
    fn from(b: bool) -> Self {
        FormulaResult::Boolean(b)
    }
}

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// The cell's value
    pub value: CellValue,
    /// Registered format, `None` for the default
    pub format: Option<FormatIndex>,
}

impl Cell {
    /// Create a new cell with a value and default format
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            format: None,
        }
    }

    /// Create a new cell with a value and format
    pub fn with_format(value: CellValue, format: Option<FormatIndex>) -> Self {
        Self { value, format }
    }
}

/// Excel error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #NULL! - Incorrect range operator
    Null,
    /// #DIV/0! - Division by zero
    Div0,
    /// #VALUE! - Wrong type of argument or operand
    Value,
    /// #REF! - Invalid cell reference
    Ref,
    /// #NAME? - Unrecognized formula name
    Name,
    /// #NUM! - Invalid numeric value
    Num,
    /// #N/A - Value not available
    Na,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Null => "#NULL!",
            CellError::Div0 => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::Na => "#N/A",
        }
    }

    /// Parse an error string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#NULL!" => Some(CellError::Null),
            "#DIV/0!" => Some(CellError::Div0),
            "#VALUE!" => Some(CellError::Value),
            "#REF!" => Some(CellError::Ref),
            "#NAME?" => Some(CellError::Name),
            "#NUM!" => Some(CellError::Num),
            "#N/A" => Some(CellError::Na),
            _ => None,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formula text is stored without its leading `=`.
pub(crate) fn strip_formula_prefix(text: &str) -> &str {
    text.strip_prefix('=').unwrap_or(text)
}
