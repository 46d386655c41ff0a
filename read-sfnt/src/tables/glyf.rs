//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use font_types::Tag;

use crate::error::ReadError;
use crate::font_data::{Cursor, FontData};
use crate::tables::loca::Loca;

/// Tag for the glyph data table.
pub const TAG: Tag = Tag::new(b"glyf");

/// Per-point flag bits in a simple glyph.
pub mod flags {
    pub const ON_CURVE_POINT: u8 = 0x01;
    pub const X_SHORT_VECTOR: u8 = 0x02;
    pub const Y_SHORT_VECTOR: u8 = 0x04;
    pub const REPEAT_FLAG: u8 = 0x08;
    pub const X_IS_SAME_OR_POSITIVE: u8 = 0x10;
    pub const Y_IS_SAME_OR_POSITIVE: u8 = 0x20;
}

/// The fixed header shared by simple and composite glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphHeader {
    /// Non-negative for simple glyphs, negative for composites.
    pub number_of_contours: i16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl GlyphHeader {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, ReadError> {
        Ok(GlyphHeader {
            number_of_contours: cursor.read_i16()?,
            x_min: cursor.read_i16()?,
            y_min: cursor.read_i16()?,
            x_max: cursor.read_i16()?,
            y_max: cursor.read_i16()?,
        })
    }
}

/// A fully decoded simple glyph outline.
///
/// All buffers are owned and sized exactly to the decoded counts; flags
/// are stored post-expansion and coordinates are absolute (deltas already
/// accumulated).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleGlyph {
    pub header: GlyphHeader,
    pub end_pts_of_contours: Vec<u16>,
    pub instructions: Vec<u8>,
    pub flags: Vec<u8>,
    pub x_coordinates: Vec<i16>,
    pub y_coordinates: Vec<i16>,
}

/// A point with its on-curve flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    pub x: i16,
    pub y: i16,
    pub on_curve: bool,
}

impl SimpleGlyph {
    /// The total number of points, derived from the last contour end.
    pub fn num_points(&self) -> usize {
        self.end_pts_of_contours
            .last()
            .map(|last| *last as usize + 1)
            .unwrap_or(0)
    }

    /// Returns an iterator over the decoded points.
    pub fn points(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        self.flags
            .iter()
            .zip(&self.x_coordinates)
            .zip(&self.y_coordinates)
            .map(|((flag, x), y)| CurvePoint {
                x: *x,
                y: *y,
                on_curve: flag & flags::ON_CURVE_POINT != 0,
            })
    }
}

/// The result of decoding one glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Zero-length `loca` span: the glyph has no outline at all.
    Empty,
    Simple(SimpleGlyph),
    /// Composite glyphs are recognized but their component list is not
    /// decoded; only the header survives.
    Composite(GlyphHeader),
}

impl Glyph {
    /// Decodes the glyph occupying exactly the bytes of `data`.
    ///
    /// Callers resolve the glyph's byte span via `loca` first; a
    /// zero-length span never reaches this function.
    pub fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let header = GlyphHeader::read(&mut cursor)?;
        if header.number_of_contours < 0 {
            return Ok(Glyph::Composite(header));
        }
        let num_contours = header.number_of_contours as usize;
        let mut end_pts_of_contours = Vec::with_capacity(num_contours);
        for _ in 0..num_contours {
            end_pts_of_contours.push(cursor.read_u16()?);
        }
        let instruction_len = cursor.read_u16()?;
        let instructions = cursor.read_bytes(instruction_len as usize)?.to_vec();
        let num_points = end_pts_of_contours
            .last()
            .map(|last| *last as usize + 1)
            .unwrap_or(0);

        // flag stream with run-length repeats
        let mut flags = Vec::with_capacity(num_points);
        while flags.len() < num_points {
            let flag = cursor.read_u8()?;
            flags.push(flag);
            if flag & flags::REPEAT_FLAG != 0 {
                let count = cursor.read_u8()? as usize;
                if flags.len() + count > num_points {
                    return Err(ReadError::MalformedData("glyf flag repeat overruns points"));
                }
                for _ in 0..count {
                    flags.push(flag);
                }
            }
        }

        let x_coordinates = read_coordinates(
            &mut cursor,
            &flags,
            flags::X_SHORT_VECTOR,
            flags::X_IS_SAME_OR_POSITIVE,
        )?;
        let y_coordinates = read_coordinates(
            &mut cursor,
            &flags,
            flags::Y_SHORT_VECTOR,
            flags::Y_IS_SAME_OR_POSITIVE,
        )?;

        Ok(Glyph::Simple(SimpleGlyph {
            header,
            end_pts_of_contours,
            instructions,
            flags,
            x_coordinates,
            y_coordinates,
        }))
    }

    pub fn header(&self) -> Option<&GlyphHeader> {
        match self {
            Glyph::Empty => None,
            Glyph::Simple(glyph) => Some(&glyph.header),
            Glyph::Composite(header) => Some(header),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Glyph::Empty)
    }
}

/// Accumulates one axis of coordinates according to the per-point flags:
/// short deltas are one unsigned byte signed by the "same or positive"
/// bit; otherwise that bit chooses between a zero delta and a full i16.
fn read_coordinates(
    cursor: &mut Cursor<'_>,
    flags: &[u8],
    short_bit: u8,
    same_or_positive_bit: u8,
) -> Result<Vec<i16>, ReadError> {
    let mut coords = Vec::with_capacity(flags.len());
    let mut value = 0i16;
    for flag in flags {
        let delta = if flag & short_bit != 0 {
            let magnitude = cursor.read_u8()? as i16;
            if flag & same_or_positive_bit != 0 {
                magnitude
            } else {
                -magnitude
            }
        } else if flag & same_or_positive_bit != 0 {
            0
        } else {
            cursor.read_i16()?
        };
        value = value.wrapping_add(delta);
        coords.push(value);
    }
    Ok(coords)
}

/// Decodes every glyph in the font, using `loca` to locate each one.
///
/// Each glyph is decoded from its own sub-slice of the table, so an
/// encoding that needs more bytes than `loca` granted it cannot run into
/// the next glyph's data; it fails with
/// [`ReadError::GlyphSpanMismatch`] instead.
pub fn parse_all(glyf: FontData, loca: &Loca) -> Result<Vec<Glyph>, ReadError> {
    let mut glyphs = Vec::with_capacity(loca.len());
    for gid in 0..loca.len() as u16 {
        glyphs.push(parse_one(glyf, loca, gid)?);
    }
    Ok(glyphs)
}

/// Decodes the single glyph `gid` from its `loca`-derived span.
pub fn parse_one(glyf: FontData, loca: &Loca, gid: u16) -> Result<Glyph, ReadError> {
    let range = loca
        .range(gid)
        .ok_or(ReadError::MalformedData("loca entries out of order"))?;
    if range.is_empty() {
        return Ok(Glyph::Empty);
    }
    let data = glyf
        .slice(range.start as usize..range.end as usize)
        .ok_or(ReadError::OutOfBounds)?;
    Glyph::read(data).map_err(|err| match err {
        ReadError::OutOfBounds => ReadError::GlyphSpanMismatch(gid),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn triangle_decodes_to_three_points() {
        let bytes = sfnt_test_data::triangle_glyf();
        let glyph = Glyph::read(FontData::new(&bytes)).unwrap();
        let Glyph::Simple(simple) = glyph else {
            panic!("expected a simple glyph");
        };
        assert_eq!(simple.header.number_of_contours, 1);
        assert_eq!(simple.end_pts_of_contours, vec![2]);
        assert_eq!(simple.num_points(), 3);
        assert!(simple.instructions.is_empty());
        assert_eq!(
            simple.points().collect::<Vec<_>>(),
            vec![
                CurvePoint { x: 0, y: 0, on_curve: true },
                CurvePoint { x: 10, y: 0, on_curve: true },
                CurvePoint { x: 5, y: 8, on_curve: true },
            ]
        );
    }

    #[test]
    fn repeat_flag_expands_run() {
        // one contour, four points: flag 0x31 repeated 3 more times
        let mut buf = sfnt_test_data::BeBuffer::new();
        buf.push_i16(1)
            .push_i16(0)
            .push_i16(0)
            .push_i16(0)
            .push_i16(0)
            .push_u16(3) // end point: 4 points
            .push_u16(0) // no instructions
            .push_u8(0x31 | flags::REPEAT_FLAG)
            .push_u8(3); // repeat count: 3 more
        let glyph = Glyph::read(FontData::new(buf.as_slice())).unwrap();
        let Glyph::Simple(simple) = glyph else {
            panic!("expected a simple glyph");
        };
        assert_eq!(simple.flags.len(), 4);
        assert!(simple.flags.iter().all(|f| f & 0x31 == 0x31));
    }

    #[test]
    fn repeat_overrunning_point_count_fails() {
        let mut buf = sfnt_test_data::BeBuffer::new();
        buf.push_i16(1)
            .push_i16(0)
            .push_i16(0)
            .push_i16(0)
            .push_i16(0)
            .push_u16(1) // two points
            .push_u16(0)
            .push_u8(0x31 | flags::REPEAT_FLAG)
            .push_u8(5); // expands to 6 flags, only 2 allowed
        assert_eq!(
            Glyph::read(FontData::new(buf.as_slice())),
            Err(ReadError::MalformedData("glyf flag repeat overruns points"))
        );
    }

    #[test]
    fn composite_header_only() {
        let mut buf = sfnt_test_data::BeBuffer::new();
        buf.push_i16(-1)
            .push_i16(1)
            .push_i16(2)
            .push_i16(3)
            .push_i16(4)
            // component data that is deliberately not decoded
            .push_u16(0)
            .push_u16(0);
        let glyph = Glyph::read(FontData::new(buf.as_slice())).unwrap();
        let Glyph::Composite(header) = glyph else {
            panic!("expected a composite glyph");
        };
        assert_eq!(header.number_of_contours, -1);
        assert_eq!((header.x_min, header.y_max), (1, 4));
    }

    #[test]
    fn contourless_glyph_has_no_points() {
        let mut buf = sfnt_test_data::BeBuffer::new();
        buf.push_i16(0)
            .push_i16(0)
            .push_i16(0)
            .push_i16(0)
            .push_i16(0)
            .push_u16(0); // instruction length
        let glyph = Glyph::read(FontData::new(buf.as_slice())).unwrap();
        let Glyph::Simple(simple) = glyph else {
            panic!("expected a simple glyph");
        };
        assert_eq!(simple.num_points(), 0);
        assert!(simple.flags.is_empty());
    }

    #[test]
    fn parse_all_short_circuits_empty_spans() {
        let glyf = sfnt_test_data::triangle_glyf();
        let loca_bytes = sfnt_test_data::loca_short(&[0, 0, 10]);
        let loca = Loca::read(FontData::new(&loca_bytes), 2, false).unwrap();
        let glyphs = parse_all(FontData::new(&glyf), &loca).unwrap();
        assert_eq!(glyphs.len(), 2);
        assert!(glyphs[0].is_empty());
        assert!(matches!(glyphs[1], Glyph::Simple(_)));
    }

    #[test]
    fn span_mismatch_is_detected() {
        // loca grants 8 bytes; the header alone is 10
        let glyf = sfnt_test_data::triangle_glyf();
        let loca_bytes = sfnt_test_data::loca_short(&[0, 4]);
        let loca = Loca::read(FontData::new(&loca_bytes), 1, false).unwrap();
        assert_eq!(
            parse_all(FontData::new(&glyf[..8]), &loca),
            Err(ReadError::GlyphSpanMismatch(0))
        );
    }
}
