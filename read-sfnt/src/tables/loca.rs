//! The [loca (Index to Location)](https://docs.microsoft.com/en-us/typography/opentype/spec/loca) table

use std::ops::Range;

use font_types::Tag;

use crate::error::ReadError;
use crate::font_data::FontData;

/// The glyph-offset index: byte offsets into the `glyf` table, one entry
/// per glyph plus a final terminator.
///
/// Offsets are stored normalized to the long form; short-form entries are
/// doubled while reading. Monotonicity is not validated here — a glyph
/// whose span comes out wrong is caught when its data is decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loca {
    offsets: Vec<u32>,
}

impl Loca {
    pub const TAG: Tag = Tag::new(b"loca");

    /// Reads `num_glyphs + 1` entries; `is_long` is
    /// `head.index_to_loc_format != 0`.
    pub fn read(data: FontData, num_glyphs: u16, is_long: bool) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count = num_glyphs as usize + 1;
        let mut offsets = Vec::with_capacity(count);
        for _ in 0..count {
            let offset = if is_long {
                cursor.read_u32()?
            } else {
                cursor.read_u16()? as u32 * 2
            };
            offsets.push(offset);
        }
        Ok(Loca { offsets })
    }

    /// The number of glyphs this table indexes.
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw byte offset of glyph `index`'s data within `glyf`.
    pub fn get_raw(&self, index: usize) -> Option<u32> {
        self.offsets.get(index).copied()
    }

    /// The byte range of glyph `index`'s data within `glyf`.
    ///
    /// A zero-length range denotes an empty glyph. Returns `None` for an
    /// out-of-range index or a non-monotonic pair of entries.
    pub fn range(&self, index: u16) -> Option<Range<u32>> {
        let start = self.get_raw(index as usize)?;
        let end = self.get_raw(index as usize + 1)?;
        (start <= end).then(|| start..end)
    }
}
