//! Cell format descriptors and their deduplication table
//!
//! This module contains:
//! - [`Format`] - Complete cell format, a plain value type
//! - [`Font`], [`Fill`], [`Border`], [`Alignment`], [`NumberFormat`] - components
//! - [`FormatTable`] - registration-time deduplication into stable indices

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod table;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{Border, BorderEdge, BorderLineStyle, DiagonalDirection};
pub use color::Color;
pub use fill::{Fill, PatternType};
pub use font::{Font, FontScheme, FontVerticalAlign, Underline, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use number_format::{builtin_format_string, NumberFormat};
pub use table::{FormatIndex, FormatTable, NamedStyleRecord, StyleXfRecord, XfRecord};

/// Complete cell format
///
/// Formats are registered by value with [`FormatTable::register`]; changing a
/// `Format` after registering it never alters the registered record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Format {
    pub font: Font,
    pub fill: Fill,
    pub border: Border,
    pub alignment: Alignment,
    pub number_format: NumberFormat,
    pub protection: Protection,
    /// Cell style the format derives from
    pub named_style: NamedStyle,
}

impl Format {
    /// Create a new default format
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the fields that have a range Excel enforces
    pub fn validate(&self) -> crate::Result<()> {
        self.font.validate()
    }

    /// Format applied to hyperlink cells without an explicit format
    pub fn hyperlink() -> Self {
        Self {
            font: Font::hyperlink(),
            named_style: NamedStyle::Hyperlink,
            ..Self::default()
        }
    }

    /// Set font to bold
    pub fn bold(mut self) -> Self {
        self.font.bold = true;
        self
    }

    /// Set font to italic
    pub fn italic(mut self) -> Self {
        self.font.italic = true;
        self
    }

    /// Set underline style
    pub fn underline(mut self, underline: Underline) -> Self {
        self.font.underline = underline;
        self
    }

    /// Set font size in points, between 1 and 409
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font = std::mem::take(&mut self.font).with_name(name);
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = Fill::solid(color);
        self
    }

    /// Set a pattern fill
    pub fn pattern(mut self, pattern: PatternType, foreground: Color, background: Color) -> Self {
        self.fill = Fill::pattern(pattern, foreground, background);
        self
    }

    /// Set the four outer borders
    pub fn border(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.border = Border::all(style, color);
        self
    }

    /// Set the bottom border only
    pub fn border_bottom(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.border.bottom = Some(BorderEdge::new(style, color));
        self
    }

    /// Set a custom number format code
    pub fn number_format<S: Into<String>>(mut self, code: S) -> Self {
        self.number_format = NumberFormat::Custom(code.into());
        self
    }

    /// Use a built-in number format by id
    pub fn number_format_id(mut self, id: u16) -> Self {
        self.number_format = NumberFormat::from_id(id);
        self
    }

    /// Set horizontal alignment
    pub fn align(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }

    /// Set vertical alignment
    pub fn valign(mut self, align: VerticalAlignment) -> Self {
        self.alignment.vertical = align;
        self
    }

    /// Enable text wrapping
    pub fn wrap_text(mut self) -> Self {
        self.alignment.wrap_text = true;
        self
    }

    /// Set indent level
    pub fn indent(mut self, level: u8) -> Self {
        self.alignment.indent = level;
        self
    }

    /// Set text rotation in degrees
    pub fn rotation(mut self, degrees: i16) -> Self {
        self.alignment = self.alignment.with_rotation(degrees);
        self
    }

    /// Mark the cell unlocked for protected sheets
    pub fn unlocked(mut self) -> Self {
        self.protection.locked = false;
        self
    }

    /// Hide the formula on protected sheets
    pub fn hidden(mut self) -> Self {
        self.protection.hidden = true;
        self
    }
}

/// Cell protection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Protection {
    /// Cell is locked (protected when sheet is protected)
    pub locked: bool,
    /// Formula is hidden when sheet is protected
    pub hidden: bool,
}

impl Default for Protection {
    fn default() -> Self {
        Self {
            locked: true,
            hidden: false,
        }
    }
}

impl Protection {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Built-in cell styles a format can derive from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamedStyle {
    #[default]
    Normal,
    Hyperlink,
}

impl NamedStyle {
    /// Name written to `<cellStyle name>`
    pub fn name(&self) -> &'static str {
        match self {
            NamedStyle::Normal => "Normal",
            NamedStyle::Hyperlink => "Hyperlink",
        }
    }

    /// Excel's `builtinId` for the style
    pub fn builtin_id(&self) -> u32 {
        match self {
            NamedStyle::Normal => 0,
            NamedStyle::Hyperlink => 8,
        }
    }
}
