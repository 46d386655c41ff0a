//! The sfnt table directory and TrueType collection header.

use font_types::Tag;

use crate::error::ReadError;
use crate::font_data::FontData;

/// sfnt version for fonts with TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// sfnt version for fonts with CFF outlines.
pub const CFF_SFNT_VERSION: u32 = u32::from_be_bytes(*b"OTTO");
/// Legacy Apple sfnt version for TrueType outlines.
pub const TRUE_SFNT_VERSION: u32 = u32::from_be_bytes(*b"true");
/// Legacy Apple sfnt version for PostScript-in-sfnt fonts.
pub const TYP1_SFNT_VERSION: u32 = u32::from_be_bytes(*b"typ1");
/// Tag identifying a TrueType collection file.
pub const TTC_TAG: Tag = Tag::new(b"ttcf");

/// Returns true if `version` marks glyph data as TrueType outlines.
pub fn has_truetype_outlines(sfnt_version: u32) -> bool {
    matches!(
        sfnt_version,
        TT_SFNT_VERSION | TRUE_SFNT_VERSION | TYP1_SFNT_VERSION
    )
}

/// One entry in the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

/// The table directory of a single font.
///
/// Built once while opening a font and never mutated afterwards; all
/// lookups are reads.
#[derive(Clone, Debug)]
pub struct TableDirectory {
    sfnt_version: u32,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    records: Vec<TableRecord>,
    // Fonts are required to have a sorted directory, but some don't;
    // fall back to a linear scan for those.
    sorted: bool,
}

impl TableDirectory {
    /// Parses the offset table and table records at the start of `data`.
    ///
    /// Fails with [`ReadError::InvalidSfnt`] if the signature is not one
    /// of the recognized sfnt versions (a `ttcf` signature is also
    /// rejected here; collections are unwrapped by the caller first).
    pub fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version = cursor.read_u32()?;
        if !matches!(
            sfnt_version,
            TT_SFNT_VERSION | CFF_SFNT_VERSION | TRUE_SFNT_VERSION | TYP1_SFNT_VERSION
        ) {
            return Err(ReadError::InvalidSfnt(sfnt_version));
        }
        let num_tables = cursor.read_u16()?;
        let search_range = cursor.read_u16()?;
        let entry_selector = cursor.read_u16()?;
        let range_shift = cursor.read_u16()?;
        let mut records = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            records.push(TableRecord {
                tag: cursor.read_tag()?,
                checksum: cursor.read_u32()?,
                offset: cursor.read_u32()?,
                length: cursor.read_u32()?,
            });
        }
        let sorted = records.windows(2).all(|pair| pair[0].tag < pair[1].tag);
        Ok(TableDirectory {
            sfnt_version,
            search_range,
            entry_selector,
            range_shift,
            records,
            sorted,
        })
    }

    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    pub fn search_range(&self) -> u16 {
        self.search_range
    }

    pub fn entry_selector(&self) -> u16 {
        self.entry_selector
    }

    pub fn range_shift(&self) -> u16 {
        self.range_shift
    }

    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }

    /// Returns the record for `tag`, if the font contains that table.
    ///
    /// Tags are exact 4-byte matches, case-sensitive.
    pub fn record(&self, tag: Tag) -> Option<&TableRecord> {
        if self.sorted {
            self.records
                .binary_search_by(|rec| rec.tag.cmp(&tag))
                .ok()
                .map(|idx| &self.records[idx])
        } else {
            self.records.iter().find(|rec| rec.tag == tag)
        }
    }
}

/// The header of a TrueType collection (`ttcf`) file.
#[derive(Clone, Debug)]
pub struct TtcHeader {
    pub major_version: u16,
    pub minor_version: u16,
    /// Byte offsets of each member font's offset table.
    pub offset_tables: Vec<u32>,
    /// Digital signature descriptor, present in version 2 headers only.
    /// Read but not otherwise consumed.
    pub dsig: Option<DsigRecord>,
}

/// Digital signature descriptor from a version 2 TTC header.
#[derive(Clone, Copy, Debug)]
pub struct DsigRecord {
    pub tag: u32,
    pub length: u32,
    pub offset: u32,
}

impl TtcHeader {
    pub fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let tag = cursor.read_tag()?;
        if tag != TTC_TAG {
            return Err(ReadError::InvalidTtc(tag));
        }
        let major_version = cursor.read_u16()?;
        let minor_version = cursor.read_u16()?;
        let num_fonts = cursor.read_u32()?;
        let mut offset_tables = Vec::with_capacity(num_fonts.min(1024) as usize);
        for _ in 0..num_fonts {
            offset_tables.push(cursor.read_u32()?);
        }
        let dsig = if major_version == 2 {
            Some(DsigRecord {
                tag: cursor.read_u32()?,
                length: cursor.read_u32()?,
                offset: cursor.read_u32()?,
            })
        } else {
            None
        };
        Ok(TtcHeader {
            major_version,
            minor_version,
            offset_tables,
            dsig,
        })
    }
}

/// Computes the checksum of the table described by `record`.
///
/// Sums `ceil(length / 4)` big-endian u32 words starting at the table's
/// offset; a table whose length is not a multiple of four is treated as
/// zero-padded.
pub fn compute_checksum(data: FontData, record: &TableRecord) -> Result<u32, ReadError> {
    let start = record.offset as usize;
    let length = record.length as usize;
    let table = data
        .slice(start..start + length)
        .ok_or(ReadError::OutOfBounds)?;
    let mut sum = 0u32;
    let mut pos = 0;
    while pos + 4 <= length {
        sum = sum.wrapping_add(table.read_u32_at(pos)?);
        pos += 4;
    }
    if pos < length {
        let mut word = [0u8; 4];
        let rest = table.read_bytes_at(pos, length - pos)?;
        word[..rest.len()].copy_from_slice(rest);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    Ok(sum)
}

/// Verifies `record`'s stored checksum against the actual table bytes.
///
/// Callers must verify a table before parsing its contents; on mismatch
/// the table's bytes are never interpreted.
pub fn verify_checksum(data: FontData, record: &TableRecord) -> Result<(), ReadError> {
    if compute_checksum(data, record)? != record.checksum {
        return Err(ReadError::ChecksumMismatch(record.tag));
    }
    Ok(())
}
