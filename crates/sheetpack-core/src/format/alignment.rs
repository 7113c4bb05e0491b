//! Text alignment

/// Text alignment settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
    pub wrap_text: bool,
    pub shrink_to_fit: bool,
    /// Indent level (0-250)
    pub indent: u8,
    /// Text rotation in degrees (-90 to 90, or 255 for stacked text)
    pub rotation: i16,
}

impl Alignment {
    /// Create a new default alignment
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no `<alignment>` element needs to be written
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Set rotation angle
    pub fn with_rotation(mut self, degrees: i16) -> Self {
        self.rotation = degrees.clamp(-90, 90);
        self
    }

    /// Stacked vertical text (rotation = 255)
    pub fn stacked(mut self) -> Self {
        self.rotation = 255;
        self
    }

    /// Rotation as written to the `textRotation` attribute
    ///
    /// Negative angles are stored as 90 + |angle|.
    pub fn text_rotation(&self) -> u16 {
        match self.rotation {
            255 => 255,
            r if r < 0 => (90 - r) as u16,
            r => r as u16,
        }
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// General alignment (text left, numbers right)
    #[default]
    General,
    Left,
    Center,
    Right,
    /// Repeat content to fill cell width
    Fill,
    Justify,
    /// Center across selection
    CenterContinuous,
    Distributed,
}

impl HorizontalAlignment {
    /// Value of the `horizontal` attribute, `None` for the default
    pub fn xml_val(&self) -> Option<&'static str> {
        match self {
            HorizontalAlignment::General => None,
            HorizontalAlignment::Left => Some("left"),
            HorizontalAlignment::Center => Some("center"),
            HorizontalAlignment::Right => Some("right"),
            HorizontalAlignment::Fill => Some("fill"),
            HorizontalAlignment::Justify => Some("justify"),
            HorizontalAlignment::CenterContinuous => Some("centerContinuous"),
            HorizontalAlignment::Distributed => Some("distributed"),
        }
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    Top,
    Center,
    /// Bottom aligned (default)
    #[default]
    Bottom,
    Justify,
    Distributed,
}

impl VerticalAlignment {
    /// Value of the `vertical` attribute, `None` for the default
    pub fn xml_val(&self) -> Option<&'static str> {
        match self {
            VerticalAlignment::Top => Some("top"),
            VerticalAlignment::Center => Some("center"),
            VerticalAlignment::Bottom => None,
            VerticalAlignment::Justify => Some("justify"),
            VerticalAlignment::Distributed => Some("distributed"),
        }
    }
}
