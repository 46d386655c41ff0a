//! The [maxp (Maximum Profile)](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use font_types::{Tag, Version16Dot16};

use crate::error::ReadError;
use crate::font_data::FontData;

/// The `maxp` table: glyph count plus resource limits for hinting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maxp {
    pub version: Version16Dot16,
    pub num_glyphs: u16,
    /// Hinting maxima, present only in version 1.0 tables.
    pub v1: Option<MaxpV1>,
}

/// The extended block of a version 1.0 `maxp` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxpV1 {
    pub max_points: u16,
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,
    pub max_component_depth: u16,
}

impl Maxp {
    pub const TAG: Tag = Tag::new(b"maxp");

    /// Reads version and glyph count unconditionally, then branches on
    /// the major version: 0 (i.e. 0.5) stops there, 1 reads the hinting
    /// maxima, anything higher is unsupported.
    pub fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let raw_version = cursor.read_u32()?;
        let num_glyphs = cursor.read_u16()?;
        let (version, v1) = match raw_version >> 16 {
            0 => (Version16Dot16::new(0, 5), None),
            1 => (Version16Dot16::new(1, 0), Some(MaxpV1 {
                max_points: cursor.read_u16()?,
                max_contours: cursor.read_u16()?,
                max_composite_points: cursor.read_u16()?,
                max_composite_contours: cursor.read_u16()?,
                max_zones: cursor.read_u16()?,
                max_twilight_points: cursor.read_u16()?,
                max_storage: cursor.read_u16()?,
                max_function_defs: cursor.read_u16()?,
                max_instruction_defs: cursor.read_u16()?,
                max_stack_elements: cursor.read_u16()?,
                max_size_of_instructions: cursor.read_u16()?,
                max_component_elements: cursor.read_u16()?,
                max_component_depth: cursor.read_u16()?,
            })),
            _ => return Err(ReadError::UnsupportedVersion(Self::TAG, raw_version)),
        };
        Ok(Maxp {
            version,
            num_glyphs,
            v1,
        })
    }
}
