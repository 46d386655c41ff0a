//! Parsing for sfnt-packaged font binaries.
//!
//! The entry point is [`FontFile`], which loads a TrueType/OpenType font
//! (or the first font of a `ttcf` collection), resolves its table
//! directory, and parses the tables needed for glyph access and hinting:
//! `head`, `maxp`, `cvt `, `loca` and `glyf`. Table contents are verified
//! against their directory checksums before being interpreted.
//!
//! All parsing happens over an in-memory copy of the file; individual
//! table parsers are pure functions over their own byte sub-range.

pub mod error;
pub mod font_data;
pub mod table_directory;
pub mod tables;

use std::path::Path;

use font_types::Tag;

pub use error::{FontError, ReadError};
pub use font_data::{Cursor, FontData};
pub use table_directory::{TableDirectory, TableRecord, TtcHeader};

use crate::table_directory::{has_truetype_outlines, verify_checksum, TTC_TAG};
use crate::tables::cvt::Cvt;
use crate::tables::glyf::{self, Glyph};
use crate::tables::head::Head;
use crate::tables::loca::Loca;
use crate::tables::maxp::Maxp;

/// A character-to-glyph mapping collaborator.
///
/// The `cmap` lookup algorithm itself lives outside this crate;
/// implementations can be built over the raw bytes exposed by
/// [`FontFile::cmap_data`].
pub trait Charmap {
    /// Returns the glyph mapped to `ch`, or `None` when unmapped.
    fn map(&self, ch: char) -> Option<u16>;
}

enum GlyphCache {
    /// Individually decoded glyphs from [`FontFile::glyph`].
    Sparse(Vec<Option<Glyph>>),
    /// Every glyph, decoded in one pass by [`FontFile::all_glyphs`].
    Full(Vec<Glyph>),
}

/// A single parsed font and its lazily decoded glyphs.
///
/// Construction parses the directory plus `head`, `maxp` and `cvt `
/// eagerly; `loca` and `glyf` are checksummed and decoded on first glyph
/// access. The container exclusively owns everything it parses, so the
/// whole type is single-threaded by design.
pub struct FontFile {
    data: Vec<u8>,
    directory: TableDirectory,
    head: Head,
    maxp: Maxp,
    cvt: Cvt,
    loca: Option<Loca>,
    glyphs: GlyphCache,
}

impl FontFile {
    /// Reads the font file at `path` fully into memory and parses it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        Ok(Self::new(data)?)
    }

    /// Parses a font from bytes already in memory.
    ///
    /// A `ttcf` collection is unwrapped to its first font; the remaining
    /// member fonts are not reachable through this type.
    pub fn new(data: Vec<u8>) -> Result<Self, ReadError> {
        let font = FontData::new(&data);
        let base_offset = if font.read_tag_at(0)? == TTC_TAG {
            let header = TtcHeader::read(font)?;
            *header
                .offset_tables
                .first()
                .ok_or(ReadError::EmptyCollection)? as usize
        } else {
            0
        };
        let directory =
            TableDirectory::read(font.split_off(base_offset).ok_or(ReadError::OutOfBounds)?)?;
        let head = Head::read(required_table(font, &directory, Head::TAG)?)?;
        let maxp = Maxp::read(required_table(font, &directory, Maxp::TAG)?)?;
        let cvt = match directory.record(Cvt::TAG) {
            Some(record) => {
                verify_checksum(font, record)?;
                Cvt::read(table_slice(font, record)?)?
            }
            None => Cvt::default(),
        };
        let num_glyphs = maxp.num_glyphs as usize;
        Ok(FontFile {
            directory,
            head,
            maxp,
            cvt,
            loca: None,
            glyphs: GlyphCache::Sparse(vec![None; num_glyphs]),
            data,
        })
    }

    pub fn sfnt_version(&self) -> u32 {
        self.directory.sfnt_version()
    }

    pub fn directory(&self) -> &TableDirectory {
        &self.directory
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn maxp(&self) -> &Maxp {
        &self.maxp
    }

    pub fn cvt(&self) -> &Cvt {
        &self.cvt
    }

    /// The control value table, mutably; the hinting engine borrows this
    /// while executing a program.
    pub fn cvt_mut(&mut self) -> &mut Cvt {
        &mut self.cvt
    }

    /// The raw bytes of the table `tag`, unvalidated.
    pub fn table_data(&self, tag: Tag) -> Option<&[u8]> {
        let record = self.directory.record(tag)?;
        FontData::new(&self.data)
            .read_bytes_at(record.offset as usize, record.length as usize)
            .ok()
    }

    /// The raw `cmap` table bytes, for [`Charmap`] implementations.
    pub fn cmap_data(&self) -> Option<&[u8]> {
        self.table_data(Tag::new(b"cmap"))
    }

    /// Resolves `ch` through `charmap`; unmapped characters fall back to
    /// glyph 0 (`.notdef`).
    pub fn glyph_id_for_char(&self, charmap: &impl Charmap, ch: char) -> u16 {
        charmap.map(ch).unwrap_or(0)
    }

    /// Decodes glyph `gid`, caching the result for repeat queries.
    pub fn glyph(&mut self, gid: u16) -> Result<&Glyph, FontError> {
        self.check_glyph_query(gid)?;
        self.ensure_loca()?;
        let index = gid as usize;
        let cached = match &self.glyphs {
            GlyphCache::Full(_) => true,
            GlyphCache::Sparse(slots) => slots[index].is_some(),
        };
        if !cached {
            let glyph = self.decode_glyph(gid)?;
            if let GlyphCache::Sparse(slots) = &mut self.glyphs {
                slots[index] = Some(glyph);
            }
        }
        match &self.glyphs {
            GlyphCache::Full(glyphs) => Ok(&glyphs[index]),
            GlyphCache::Sparse(slots) => slots[index]
                .as_ref()
                .ok_or_else(|| ReadError::MalformedData("glyph cache miss").into()),
        }
    }

    /// Decodes every glyph in one pass over `glyf`, caching the result.
    pub fn all_glyphs(&mut self) -> Result<&[Glyph], FontError> {
        if !has_truetype_outlines(self.directory.sfnt_version()) {
            return Err(ReadError::NoTrueTypeOutlines.into());
        }
        self.ensure_loca()?;
        if !matches!(self.glyphs, GlyphCache::Full(_)) {
            let font = FontData::new(&self.data);
            let record = self
                .directory
                .record(glyf::TAG)
                .ok_or(ReadError::TableIsMissing(glyf::TAG))?;
            let loca = self
                .loca
                .as_ref()
                .ok_or(ReadError::TableIsMissing(Loca::TAG))?;
            let glyphs = glyf::parse_all(table_slice(font, record)?, loca)?;
            self.glyphs = GlyphCache::Full(glyphs);
        }
        match &self.glyphs {
            GlyphCache::Full(glyphs) => Ok(glyphs),
            GlyphCache::Sparse(_) => Err(ReadError::MalformedData("glyph cache miss").into()),
        }
    }

    fn check_glyph_query(&self, gid: u16) -> Result<(), ReadError> {
        if !has_truetype_outlines(self.directory.sfnt_version()) {
            return Err(ReadError::NoTrueTypeOutlines);
        }
        if gid >= self.maxp.num_glyphs {
            return Err(ReadError::MalformedData("glyph index out of range"));
        }
        Ok(())
    }

    /// Verifies and parses `loca` (and verifies `glyf`) on first use.
    fn ensure_loca(&mut self) -> Result<(), ReadError> {
        if self.loca.is_some() {
            return Ok(());
        }
        let font = FontData::new(&self.data);
        let loca_record = *self
            .directory
            .record(Loca::TAG)
            .ok_or(ReadError::TableIsMissing(Loca::TAG))?;
        let glyf_record = *self
            .directory
            .record(glyf::TAG)
            .ok_or(ReadError::TableIsMissing(glyf::TAG))?;
        verify_checksum(font, &loca_record)?;
        verify_checksum(font, &glyf_record)?;
        let is_long = self.head.index_to_loc_format != 0;
        let loca = Loca::read(
            table_slice(font, &loca_record)?,
            self.maxp.num_glyphs,
            is_long,
        )?;
        self.loca = Some(loca);
        Ok(())
    }

    fn decode_glyph(&self, gid: u16) -> Result<Glyph, ReadError> {
        let font = FontData::new(&self.data);
        let record = self
            .directory
            .record(glyf::TAG)
            .ok_or(ReadError::TableIsMissing(glyf::TAG))?;
        let loca = self
            .loca
            .as_ref()
            .ok_or(ReadError::TableIsMissing(Loca::TAG))?;
        glyf::parse_one(table_slice(font, record)?, loca, gid)
    }
}

fn required_table<'a>(
    font: FontData<'a>,
    directory: &TableDirectory,
    tag: Tag,
) -> Result<FontData<'a>, ReadError> {
    let record = directory.record(tag).ok_or(ReadError::TableIsMissing(tag))?;
    verify_checksum(font, record)?;
    table_slice(font, record)
}

fn table_slice<'a>(font: FontData<'a>, record: &TableRecord) -> Result<FontData<'a>, ReadError> {
    let start = record.offset as usize;
    let end = start + record.length as usize;
    font.slice(start..end).ok_or(ReadError::OutOfBounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::glyf::CurvePoint;
    use pretty_assertions::assert_eq;

    fn triangle_points(glyph: &Glyph) -> Vec<CurvePoint> {
        match glyph {
            Glyph::Simple(simple) => simple.points().collect(),
            other => panic!("expected a simple glyph, got {other:?}"),
        }
    }

    #[test]
    fn minimal_font_end_to_end() {
        let mut font = FontFile::new(sfnt_test_data::minimal_font()).unwrap();
        assert_eq!(font.head().units_per_em, 1000);
        assert_eq!(font.maxp().num_glyphs, 1);
        assert_eq!(font.cvt().values(), &[10, -20, 30, 40]);

        let glyph = font.glyph(0).unwrap();
        let points = triangle_points(glyph);
        assert_eq!(
            points,
            vec![
                CurvePoint { x: 0, y: 0, on_curve: true },
                CurvePoint { x: 10, y: 0, on_curve: true },
                CurvePoint { x: 5, y: 8, on_curve: true },
            ]
        );
        let header = glyph.header().unwrap();
        assert_eq!(
            (header.x_min, header.y_min, header.x_max, header.y_max),
            (0, 0, 10, 8)
        );
    }

    #[test]
    fn repeated_queries_hit_the_cache() {
        let mut font = FontFile::new(sfnt_test_data::minimal_font()).unwrap();
        let first = font.glyph(0).unwrap().clone();
        let second = font.glyph(0).unwrap().clone();
        assert_eq!(first, second);
        let all = font.all_glyphs().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(&all[0], &first);
        // and again, from the full cache this time
        assert_eq!(font.glyph(0).unwrap(), &first);
    }

    #[test]
    fn collection_unwraps_to_first_font() {
        for version in [1, 2] {
            let mut font = FontFile::new(sfnt_test_data::ttc_font(version)).unwrap();
            assert_eq!(font.maxp().num_glyphs, 1);
            assert!(matches!(font.glyph(0), Ok(Glyph::Simple(_))));
        }
    }

    #[test]
    fn cff_font_parses_but_refuses_glyph_queries() {
        let mut font = FontFile::new(sfnt_test_data::cff_font()).unwrap();
        assert_eq!(font.sfnt_version(), sfnt_test_data::CFF_SFNT_VERSION);
        assert!(matches!(
            font.glyph(0),
            Err(FontError::Read(ReadError::NoTrueTypeOutlines))
        ));
        assert!(matches!(
            font.all_glyphs(),
            Err(FontError::Read(ReadError::NoTrueTypeOutlines))
        ));
    }

    #[test]
    fn span_mismatch_surfaces_the_glyph_id() {
        let mut font = FontFile::new(sfnt_test_data::span_mismatch_font()).unwrap();
        assert!(matches!(
            font.glyph(0),
            Err(FontError::Read(ReadError::GlyphSpanMismatch(0)))
        ));
        assert!(matches!(
            font.all_glyphs(),
            Err(FontError::Read(ReadError::GlyphSpanMismatch(0)))
        ));
    }

    #[test]
    fn corrupted_table_fails_its_checksum() {
        let mut bytes = sfnt_test_data::minimal_font();
        // the cvt table is the first one after the directory
        let cvt_offset = 12 + 5 * 16;
        bytes[cvt_offset] ^= 0xFF;
        assert_eq!(
            FontFile::new(bytes).err(),
            Some(ReadError::ChecksumMismatch(Cvt::TAG))
        );
    }

    #[test]
    fn missing_required_table_is_reported() {
        let maxp = sfnt_test_data::maxp_v1(1);
        let bytes = sfnt_test_data::build_font(
            sfnt_test_data::TT_SFNT_VERSION,
            &[(Maxp::TAG, &maxp)],
            0,
        );
        assert_eq!(
            FontFile::new(bytes).err(),
            Some(ReadError::TableIsMissing(Head::TAG))
        );
    }

    #[test]
    fn absent_cvt_is_empty() {
        let head = sfnt_test_data::head_table(0, sfnt_test_data::HEAD_MAGIC);
        let maxp = sfnt_test_data::maxp_v1(1);
        let bytes = sfnt_test_data::build_font(
            sfnt_test_data::TT_SFNT_VERSION,
            &[(Head::TAG, &head), (Maxp::TAG, &maxp)],
            0,
        );
        let font = FontFile::new(bytes).unwrap();
        assert!(font.cvt().is_empty());
    }

    #[test]
    fn out_of_range_glyph_id_fails() {
        let mut font = FontFile::new(sfnt_test_data::minimal_font()).unwrap();
        assert!(font.glyph(1).is_err());
    }

    #[test]
    fn raw_table_access() {
        let font = FontFile::new(sfnt_test_data::minimal_font()).unwrap();
        let maxp = font.table_data(Maxp::TAG).unwrap();
        assert_eq!(maxp.len(), 32);
        assert!(font.cmap_data().is_none());
    }

    struct OneGlyphMap;

    impl Charmap for OneGlyphMap {
        fn map(&self, ch: char) -> Option<u16> {
            (ch == 'A').then_some(1)
        }
    }

    #[test]
    fn unmapped_chars_fall_back_to_notdef() {
        let font = FontFile::new(sfnt_test_data::minimal_font()).unwrap();
        assert_eq!(font.glyph_id_for_char(&OneGlyphMap, 'A'), 1);
        assert_eq!(font.glyph_id_for_char(&OneGlyphMap, 'B'), 0);
    }
}
