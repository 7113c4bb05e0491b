//! Shared string table
//!
//! Every distinct string written to a workbook is stored once and referenced
//! from cells by [`StringIndex`]. Indices are assigned in first-seen order and
//! never change, so the `sharedStrings` part is a straight walk over the table.

use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::MAX_STRING_LEN;

/// Stable index of a string in the [`StringTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringIndex(u32);

impl StringIndex {
    /// Raw index as written in `<v>` of a `t="s"` cell
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Deduplicating, append-only string table
#[derive(Debug, Default)]
pub struct StringTable {
    /// Lookup from content to index
    index: AHashMap<Arc<str>, StringIndex>,
    /// Strings in first-seen order
    strings: Vec<Arc<str>>,
    /// Number of `intern` calls that succeeded
    total: u64,
}

impl StringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its stable index
    ///
    /// Byte-equal strings always receive the same index. Strings longer than
    /// 32,767 characters are rejected and leave the table unchanged.
    pub fn intern(&mut self, value: &str) -> Result<StringIndex> {
        if value.len() > MAX_STRING_LEN && value.chars().count() > MAX_STRING_LEN {
            return Err(Error::MaxStringLengthExceeded);
        }

        self.total += 1;
        if let Some(&idx) = self.index.get(value) {
            return Ok(idx);
        }

        let idx = StringIndex(self.strings.len() as u32);
        let shared: Arc<str> = Arc::from(value);
        self.index.insert(shared.clone(), idx);
        self.strings.push(shared);
        Ok(idx)
    }

    /// Look up a string by index
    pub fn get(&self, index: StringIndex) -> Result<&str> {
        self.strings
            .get(index.0 as usize)
            .map(|s| s.as_ref())
            .ok_or(Error::SharedStringIndexNotFound(index.0))
    }

    /// Number of distinct strings (`uniqueCount`)
    pub fn unique_count(&self) -> usize {
        self.strings.len()
    }

    /// Number of successful interns, duplicates included (`count`)
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// Check if no string has been interned
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over strings in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(|s| s.as_ref())
    }
}
