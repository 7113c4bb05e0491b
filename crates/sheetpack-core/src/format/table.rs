//! Format table for deduplication
//!
//! Excel files typically have many cells sharing the same format. The table
//! stores each distinct [`Format`] once and splits it into the component
//! records the styles part lists: fonts, fills, borders, custom number
//! formats, and the cell-style xf each cell xf derives from. All of that work
//! happens at registration, so writing `styles.xml` is a straight walk over
//! stable tables.

use std::hash::{Hash, Hasher};

use ahash::AHashMap;

use super::{Border, Fill, Font, Format, NamedStyle, NumberFormat};
use super::{Alignment, Protection};
use crate::error::{Error, Result};

/// Stable index of a registered format (the cell's `s` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatIndex(u32);

impl FormatIndex {
    /// The default "Normal" format
    pub const DEFAULT: FormatIndex = FormatIndex(0);

    pub fn get(self) -> u32 {
        self.0
    }
}

/// One `<xf>` entry of `<cellXfs>`
#[derive(Debug, Clone, PartialEq)]
pub struct XfRecord {
    pub font_id: u32,
    pub fill_id: u32,
    pub border_id: u32,
    pub num_fmt_id: u16,
    /// Index into `<cellStyleXfs>`
    pub style_xf_id: u32,
    pub alignment: Alignment,
    pub protection: Protection,
}

/// One `<xf>` entry of `<cellStyleXfs>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleXfRecord {
    pub font_id: u32,
    pub fill_id: u32,
    pub border_id: u32,
    pub num_fmt_id: u16,
}

/// One `<cellStyle>` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedStyleRecord {
    pub name: &'static str,
    pub style_xf_id: u32,
    pub builtin_id: u32,
}

/// Append-only deduplicated list
#[derive(Debug)]
struct Dedup<T> {
    items: Vec<T>,
    index: AHashMap<T, u32>,
}

impl<T: Hash + Eq + Clone> Dedup<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            index: AHashMap::new(),
        }
    }

    fn insert(&mut self, item: &T) -> u32 {
        if let Some(&idx) = self.index.get(item) {
            return idx;
        }
        let idx = self.items.len() as u32;
        self.index.insert(item.clone(), idx);
        self.items.push(item.clone());
        idx
    }
}

/// Key for format lookup (hash-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FormatKey(u64);

impl FormatKey {
    fn from_format(format: &Format) -> Self {
        let mut hasher = ahash::AHasher::default();
        format.hash(&mut hasher);
        FormatKey(hasher.finish())
    }
}

/// Deduplicating, append-only format table
///
/// Index 0 is always the default format, backed by font 0, fill 0, border 0
/// and the "Normal" cell style.
#[derive(Debug)]
pub struct FormatTable {
    /// Registered formats by index
    formats: Vec<Format>,
    /// Hash buckets; full values are compared on lookup
    lookup: AHashMap<FormatKey, Vec<u32>>,
    xfs: Vec<XfRecord>,
    fonts: Dedup<Font>,
    fills: Dedup<Fill>,
    borders: Dedup<Border>,
    /// Custom number formats in id order
    num_formats: Vec<(u16, String)>,
    num_format_ids: AHashMap<String, u16>,
    style_xfs: Vec<StyleXfRecord>,
    named_styles: Vec<NamedStyleRecord>,
}

impl FormatTable {
    /// Create a table holding only the default format
    pub fn new() -> Self {
        let mut table = Self {
            formats: Vec::with_capacity(16),
            lookup: AHashMap::with_capacity(16),
            xfs: Vec::with_capacity(16),
            fonts: Dedup::new(),
            fills: Dedup::new(),
            borders: Dedup::new(),
            num_formats: Vec::new(),
            num_format_ids: AHashMap::new(),
            style_xfs: Vec::new(),
            named_styles: Vec::new(),
        };

        // Fills 0 and 1 are reserved
        table.fills.insert(&Fill::None);
        table.fills.insert(&Fill::gray125());

        table.register(&Format::default());
        table
    }

    /// Register a format, returning its stable index
    ///
    /// Structurally equal formats always receive the same index.
    pub fn register(&mut self, format: &Format) -> FormatIndex {
        let key = FormatKey::from_format(format);

        if let Some(bucket) = self.lookup.get(&key) {
            // Hash collision check
            if let Some(&idx) = bucket
                .iter()
                .find(|&&idx| self.formats[idx as usize] == *format)
            {
                return FormatIndex(idx);
            }
        }

        let style_xf_id = self.style_xf_id(format.named_style);
        let xf = XfRecord {
            font_id: self.fonts.insert(&format.font),
            fill_id: self.fills.insert(&format.fill),
            border_id: self.borders.insert(&format.border),
            num_fmt_id: self.num_format_id(&format.number_format),
            style_xf_id,
            alignment: format.alignment,
            protection: format.protection,
        };

        let idx = self.formats.len() as u32;
        self.formats.push(format.clone());
        self.xfs.push(xf);
        self.lookup.entry(key).or_default().push(idx);
        FormatIndex(idx)
    }

    /// Look up a registered format
    pub fn get(&self, index: FormatIndex) -> Result<&Format> {
        self.formats
            .get(index.0 as usize)
            .ok_or(Error::FormatIndexNotFound(index.0))
    }

    /// Number of registered formats
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Check if only the default format is registered
    pub fn is_empty(&self) -> bool {
        self.formats.len() <= 1
    }

    /// `<cellXfs>` records by format index
    pub fn xf_records(&self) -> &[XfRecord] {
        &self.xfs
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts.items
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills.items
    }

    pub fn borders(&self) -> &[Border] {
        &self.borders.items
    }

    /// Custom number formats as `(id, code)` pairs, ids ascending from 164
    pub fn num_formats(&self) -> &[(u16, String)] {
        &self.num_formats
    }

    /// `<cellStyleXfs>` records
    pub fn cell_style_xfs(&self) -> &[StyleXfRecord] {
        &self.style_xfs
    }

    /// `<cellStyle>` records, in registration order
    pub fn named_styles(&self) -> &[NamedStyleRecord] {
        &self.named_styles
    }

    fn num_format_id(&mut self, number_format: &NumberFormat) -> u16 {
        if let Some(id) = number_format.builtin_id() {
            return id;
        }
        let code = number_format.format_string();
        if let Some(&id) = self.num_format_ids.get(code) {
            return id;
        }
        let id = NumberFormat::FIRST_CUSTOM_ID + self.num_formats.len() as u16;
        self.num_format_ids.insert(code.to_string(), id);
        self.num_formats.push((id, code.to_string()));
        id
    }

    /// Index of the cell-style xf for `style`, created on first use
    fn style_xf_id(&mut self, style: NamedStyle) -> u32 {
        if let Some(record) = self.named_styles.iter().find(|r| r.name == style.name()) {
            return record.style_xf_id;
        }

        let font = match style {
            NamedStyle::Normal => Font::default(),
            NamedStyle::Hyperlink => Font::hyperlink(),
        };
        let record = StyleXfRecord {
            font_id: self.fonts.insert(&font),
            fill_id: 0,
            border_id: 0,
            num_fmt_id: 0,
        };
        let id = self.style_xfs.len() as u32;
        self.style_xfs.push(record);
        self.named_styles.push(NamedStyleRecord {
            name: style.name(),
            style_xf_id: id,
            builtin_id: style.builtin_id(),
        });
        id
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        Self::new()
    }
}
