//! Font records

use super::Color;
use crate::error::{Error, Result};

/// Smallest and largest font size Excel accepts, in points
pub const MIN_FONT_SIZE: f64 = 1.0;
pub const MAX_FONT_SIZE: f64 = 409.0;

/// Font settings of a cell format
#[derive(Debug, Clone)]
pub struct Font {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: String,
    /// Font size in points
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: Underline,
    pub strikethrough: bool,
    pub color: Color,
    /// Superscript/subscript
    pub vertical_align: FontVerticalAlign,
    /// Font family class (2 = Swiss)
    pub family: u8,
    /// Theme font scheme
    pub scheme: FontScheme,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 11.0,
            bold: false,
            italic: false,
            underline: Underline::None,
            strikethrough: false,
            color: Color::Auto,
            vertical_align: FontVerticalAlign::Baseline,
            family: 2,
            scheme: FontScheme::Minor,
        }
    }
}

impl Font {
    /// Create a new default font
    pub fn new() -> Self {
        Self::default()
    }

    /// Font of the built-in Hyperlink cell style
    pub fn hyperlink() -> Self {
        Self {
            underline: Underline::Single,
            color: Color::HYPERLINK,
            ..Self::default()
        }
    }

    /// Set font name
    ///
    /// A non-theme font drops the minor scheme so Excel does not substitute
    /// the theme font back in.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        if self.name != "Calibri" {
            self.scheme = FontScheme::None;
        }
        self
    }

    /// Set font size
    ///
    /// The size is checked when the format is used, see [`Font::validate`].
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Check that the font can be written to a styles part
    pub fn validate(&self) -> Result<()> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.size) {
            return Err(Error::ParameterValidation(format!(
                "font size {} is outside {}..={}",
                self.size, MIN_FONT_SIZE, MAX_FONT_SIZE
            )));
        }
        Ok(())
    }

    /// Bit pattern of the size with -0.0 folded into 0.0 and one NaN
    fn size_bits(&self) -> u64 {
        if self.size == 0.0 {
            0.0f64.to_bits()
        } else if self.size.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.size.to_bits()
        }
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline
    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.size_bits() == other.size_bits()
            && self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.strikethrough == other.strikethrough
            && self.color == other.color
            && self.vertical_align == other.vertical_align
            && self.family == other.family
            && self.scheme == other.scheme
    }
}

impl Eq for Font {}

impl std::hash::Hash for Font {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size_bits().hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.underline.hash(state);
        self.strikethrough.hash(state);
        self.color.hash(state);
        self.vertical_align.hash(state);
        self.family.hash(state);
        self.scheme.hash(state);
    }
}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
    /// Single accounting underline (extends to cell width)
    SingleAccounting,
    DoubleAccounting,
}

impl Underline {
    /// Value of the `<u val>` attribute; `None` for single, which is the default
    pub fn xml_val(&self) -> Option<&'static str> {
        match self {
            Underline::None | Underline::Single => None,
            Underline::Double => Some("double"),
            Underline::SingleAccounting => Some("singleAccounting"),
            Underline::DoubleAccounting => Some("doubleAccounting"),
        }
    }
}

/// Font vertical alignment (superscript/subscript)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontVerticalAlign {
    #[default]
    Baseline,
    Superscript,
    Subscript,
}

/// Theme font scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontScheme {
    None,
    #[default]
    Minor,
    Major,
}

impl FontScheme {
    pub fn xml_val(&self) -> Option<&'static str> {
        match self {
            FontScheme::None => None,
            FontScheme::Minor => Some("minor"),
            FontScheme::Major => Some("major"),
        }
    }
}
