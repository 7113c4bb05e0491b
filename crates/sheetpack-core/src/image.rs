//! Image metadata seam
//!
//! Drawing parts are produced outside this crate. What the workbook needs
//! from an image is its pixel size, resolution and file type, which an
//! [`ImageProbe`] implementation extracts from the raw bytes.

use crate::error::{Error, Result};

/// Image container types Excel accepts in a drawing part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageType {
    /// File extension used for the media part
    pub fn extension(&self) -> &'static str {
        match self {
            ImageType::Png => "png",
            ImageType::Jpeg => "jpeg",
            ImageType::Gif => "gif",
            ImageType::Bmp => "bmp",
        }
    }

    /// Content type registered for the extension
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageType::Png => "image/png",
            ImageType::Jpeg => "image/jpeg",
            ImageType::Gif => "image/gif",
            ImageType::Bmp => "image/bmp",
        }
    }
}

/// Pixel size and resolution of an image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageInfo {
    pub image_type: ImageType,
    pub width: u32,
    pub height: u32,
    pub x_dpi: f64,
    pub y_dpi: f64,
}

impl ImageInfo {
    pub fn new(image_type: ImageType, width: u32, height: u32) -> Self {
        Self {
            image_type,
            width,
            height,
            x_dpi: 96.0,
            y_dpi: 96.0,
        }
    }

    /// Reject images Excel cannot place: zero-sized or with a non-positive DPI
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::ImageDimensions(format!(
                "{}x{} pixels",
                self.width, self.height
            )));
        }
        if !(self.x_dpi > 0.0 && self.y_dpi > 0.0) {
            return Err(Error::ImageDimensions(format!(
                "{}x{} dpi",
                self.x_dpi, self.y_dpi
            )));
        }
        Ok(())
    }
}

/// Extracts [`ImageInfo`] from encoded image bytes
pub trait ImageProbe {
    fn probe(&self, data: &[u8]) -> Result<ImageInfo>;
}
