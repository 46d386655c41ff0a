//! Synthetic font data shared by the parser and hinting engine tests.
//!
//! Everything here builds well-formed (or deliberately malformed) font
//! binaries from scratch so tests do not depend on real font files.

pub mod bebuffer;

pub use bebuffer::BeBuffer;

use font_types::Tag;

/// The `head` table magic number.
pub const HEAD_MAGIC: u32 = 0x5F0F3CF5;

/// sfnt version for fonts with TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;

/// sfnt version for fonts with CFF outlines.
pub const CFF_SFNT_VERSION: u32 = u32::from_be_bytes(*b"OTTO");

/// Computes an OpenType table checksum: the sum of big-endian u32 words,
/// with the table zero-padded to a word boundary.
pub fn checksum(bytes: &[u8]) -> u32 {
    let mut sum = 0u32;
    let mut chunks = bytes.chunks_exact(4);
    for chunk in &mut chunks {
        sum = sum.wrapping_add(u32::from_be_bytes(chunk.try_into().unwrap()));
    }
    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let mut word = [0u8; 4];
        word[..remainder.len()].copy_from_slice(remainder);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    sum
}

/// Assembles a single-font sfnt file from raw tables.
///
/// Table records carry correct checksums and lengths; table data is placed
/// in argument order, word aligned. `base_offset` is added to every record
/// offset so the font can be embedded in a collection file.
pub fn build_font(sfnt_version: u32, tables: &[(Tag, &[u8])], base_offset: u32) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = num_tables.checked_ilog2().unwrap_or(0) as u16;
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = num_tables * 16 - search_range;

    let mut data_start = 12 + num_tables as u32 * 16;
    let mut buf = BeBuffer::new();
    buf.push_u32(sfnt_version)
        .push_u16(num_tables)
        .push_u16(search_range)
        .push_u16(entry_selector)
        .push_u16(range_shift);
    for (tag, table) in tables {
        buf.push_tag(*tag)
            .push_u32(checksum(table))
            .push_u32(base_offset + data_start)
            .push_u32(table.len() as u32);
        data_start += (table.len() as u32).next_multiple_of(4);
    }
    for (_, table) in tables {
        buf.extend(table).align4();
    }
    buf.into_vec()
}

/// A `head` table with the given loca format and magic number.
///
/// Pass [`HEAD_MAGIC`] for a valid table; anything else to test the magic
/// check.
pub fn head_table(index_to_loc_format: i16, magic: u32) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    buf.push_u16(1) // major version
        .push_u16(0) // minor version
        .push_u32(0x00010000) // font revision 1.0
        .push_u32(0) // checksum adjustment
        .push_u32(magic)
        .push_u16(0) // flags
        .push_u16(1000) // units per em
        .push_i64(0) // created
        .push_i64(0) // modified
        .push_i16(0) // x min
        .push_i16(0) // y min
        .push_i16(10) // x max
        .push_i16(8) // y max
        .push_u16(0) // mac style
        .push_u16(7) // lowest rec ppem
        .push_i16(2) // font direction hint
        .push_i16(index_to_loc_format)
        .push_i16(0); // glyph data format
    buf.into_vec()
}

/// A version 1.0 `maxp` table with full hinting maxima.
pub fn maxp_v1(num_glyphs: u16) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    buf.push_u32(0x00010000)
        .push_u16(num_glyphs)
        .push_u16(8) // max points
        .push_u16(4) // max contours
        .push_u16(0) // max composite points
        .push_u16(0) // max composite contours
        .push_u16(2) // max zones
        .push_u16(0) // max twilight points
        .push_u16(64) // max storage
        .push_u16(0) // max function defs
        .push_u16(0) // max instruction defs
        .push_u16(256) // max stack elements
        .push_u16(64) // max size of instructions
        .push_u16(0) // max component elements
        .push_u16(0); // max component depth
    buf.into_vec()
}

/// A version 0.5 `maxp` table (glyph count only).
pub fn maxp_v05(num_glyphs: u16) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    buf.push_u32(0x00005000).push_u16(num_glyphs);
    buf.into_vec()
}

/// A `maxp` table with an unsupported major version.
pub fn maxp_v2() -> Vec<u8> {
    let mut buf = BeBuffer::new();
    buf.push_u32(0x00020000).push_u16(1);
    buf.into_vec()
}

/// A `cvt ` table from the given control values.
pub fn cvt_table(values: &[i16]) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    for value in values {
        buf.push_i16(*value);
    }
    buf.into_vec()
}

/// A short-format `loca` table. Entries are the already-halved u16 words.
pub fn loca_short(halved_offsets: &[u16]) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    for offset in halved_offsets {
        buf.push_u16(*offset);
    }
    buf.into_vec()
}

/// A long-format `loca` table.
pub fn loca_long(offsets: &[u32]) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    for offset in offsets {
        buf.push_u32(*offset);
    }
    buf.into_vec()
}

/// A `glyf` table holding one simple triangle glyph.
///
/// One contour, end point 2 (three points), no instructions. The decoded
/// points are (0,0), (10,0) and (5,8); the encoding is exactly 20 bytes.
pub fn triangle_glyf() -> Vec<u8> {
    let mut buf = BeBuffer::new();
    buf.push_i16(1) // number of contours
        .push_i16(0) // x min
        .push_i16(0) // y min
        .push_i16(10) // x max
        .push_i16(8) // y max
        .push_u16(2) // end point of contour 0
        .push_u16(0) // instruction length
        // flags: on-curve, with x/y short or same bits per point
        .push_u8(0x31) // dx same, dy same
        .push_u8(0x33) // dx short positive, dy same
        .push_u8(0x27) // dx short negative, dy short positive
        // x deltas
        .push_u8(10)
        .push_u8(5)
        // y deltas
        .push_u8(8);
    buf.into_vec()
}

/// A complete minimal TrueType font: one triangle glyph, short loca,
/// four CVT entries, version 1.0 maxp.
pub fn minimal_font() -> Vec<u8> {
    let head = head_table(0, HEAD_MAGIC);
    let maxp = maxp_v1(1);
    let cvt = cvt_table(&[10, -20, 30, 40]);
    let loca = loca_short(&[0, 10]);
    let glyf = triangle_glyf();
    build_font(
        TT_SFNT_VERSION,
        &[
            (Tag::new(b"cvt "), &cvt),
            (Tag::new(b"glyf"), &glyf),
            (Tag::new(b"head"), &head),
            (Tag::new(b"loca"), &loca),
            (Tag::new(b"maxp"), &maxp),
        ],
        0,
    )
}

/// A font whose `loca` spans disagree with the actual glyph encoding:
/// loca promises 8 bytes for glyph 0 but the glyph header alone needs 10.
pub fn span_mismatch_font() -> Vec<u8> {
    let head = head_table(0, HEAD_MAGIC);
    let maxp = maxp_v1(1);
    let loca = loca_short(&[0, 4]);
    let glyf = &triangle_glyf()[..8];
    build_font(
        TT_SFNT_VERSION,
        &[
            (Tag::new(b"glyf"), glyf),
            (Tag::new(b"head"), &head),
            (Tag::new(b"loca"), &loca),
            (Tag::new(b"maxp"), &maxp),
        ],
        0,
    )
}

/// A CFF-flavored font (`OTTO` sfnt version) with no TrueType outlines.
pub fn cff_font() -> Vec<u8> {
    let head = head_table(0, HEAD_MAGIC);
    let maxp = maxp_v05(1);
    build_font(
        CFF_SFNT_VERSION,
        &[(Tag::new(b"head"), &head), (Tag::new(b"maxp"), &maxp)],
        0,
    )
}

/// Wraps [`minimal_font`] in a TrueType collection with one font.
///
/// `major_version` selects the TTC header version; version 2 carries a
/// null digital signature descriptor.
pub fn ttc_font(major_version: u16) -> Vec<u8> {
    let header_len: u32 = match major_version {
        2 => 28,
        _ => 16,
    };
    let head = head_table(0, HEAD_MAGIC);
    let maxp = maxp_v1(1);
    let cvt = cvt_table(&[10, -20, 30, 40]);
    let loca = loca_short(&[0, 10]);
    let glyf = triangle_glyf();
    let font = build_font(
        TT_SFNT_VERSION,
        &[
            (Tag::new(b"cvt "), &cvt),
            (Tag::new(b"glyf"), &glyf),
            (Tag::new(b"head"), &head),
            (Tag::new(b"loca"), &loca),
            (Tag::new(b"maxp"), &maxp),
        ],
        header_len,
    );
    let mut buf = BeBuffer::new();
    buf.push_tag(Tag::new(b"ttcf"))
        .push_u16(major_version)
        .push_u16(0)
        .push_u32(1) // num fonts
        .push_u32(header_len); // offset of the first (only) offset table
    if major_version == 2 {
        buf.push_u32(0).push_u32(0).push_u32(0); // dsig tag/length/offset
    }
    buf.extend(&font);
    buf.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_pads_with_zeros() {
        assert_eq!(checksum(&[0, 0, 0, 1, 0x80]), 0x80000001);
    }

    #[test]
    fn minimal_font_layout() {
        let font = minimal_font();
        // offset table + 5 records
        assert_eq!(u32::from_be_bytes(font[0..4].try_into().unwrap()), TT_SFNT_VERSION);
        assert_eq!(u16::from_be_bytes(font[4..6].try_into().unwrap()), 5);
        // first record is cvt, data starts right after the directory
        assert_eq!(&font[12..16], b"cvt ");
        let cvt_offset = u32::from_be_bytes(font[20..24].try_into().unwrap());
        assert_eq!(cvt_offset, 12 + 5 * 16);
    }

    #[test]
    fn triangle_glyf_is_twenty_bytes() {
        assert_eq!(triangle_glyf().len(), 20);
    }
}
